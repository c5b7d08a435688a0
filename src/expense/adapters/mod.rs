//! Adapter implementations for expense ports.

pub mod filesystem;
pub mod mail;
pub mod memory;
pub mod postgres;

use sha2::{Digest, Sha256};

/// Returns the lowercase hex SHA-256 of the content.
fn hex_digest(content: &[u8]) -> String {
    Sha256::digest(content)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Builds a blob key from the content digest and the original extension.
///
/// Only short alphanumeric extensions are kept, so keys never contain path
/// separators.
fn blob_key(sha256: &str, file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });
    match extension {
        Some(ext) => format!("{sha256}.{ext}"),
        None => sha256.to_owned(),
    }
}

/// Returns `true` when the key is a single plain file name.
fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
}
