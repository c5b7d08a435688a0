//! Receipt store confined to a single directory via `cap-std`.

use super::{blob_key, hex_digest, is_plain_key};
use crate::expense::{
    domain::StoredBlob,
    ports::{ReceiptStore, ReceiptStoreError, ReceiptStoreResult},
};
use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

/// Stores receipt blobs as content-addressed files in one directory.
///
/// All access goes through a capability handle for the directory, so keys
/// cannot reach outside it.
#[derive(Debug, Clone)]
pub struct FilesystemReceiptStore {
    dir: Arc<Dir>,
    base_url: String,
}

impl FilesystemReceiptStore {
    /// Opens the store, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptStoreError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path, base_url: impl Into<String>) -> ReceiptStoreResult<Self> {
        std::fs::create_dir_all(path).map_err(ReceiptStoreError::io)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(ReceiptStoreError::io)?;
        Ok(Self {
            dir: Arc::new(dir),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> ReceiptStoreResult<T>
    where
        F: FnOnce(&Dir) -> ReceiptStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(ReceiptStoreError::io)?
    }
}

#[async_trait]
impl ReceiptStore for FilesystemReceiptStore {
    async fn put(&self, file_name: &str, content: &[u8]) -> ReceiptStoreResult<StoredBlob> {
        let sha256 = hex_digest(content);
        let key = blob_key(&sha256, file_name);
        let url = format!("{}/{key}", self.base_url);
        let bytes = content.to_vec();
        let target = key.clone();

        self.run_blocking(move |dir| {
            if !dir.exists(&target) {
                dir.write(&target, &bytes).map_err(ReceiptStoreError::io)?;
            }
            Ok(())
        })
        .await?;
        tracing::debug!(%key, size = content.len(), "stored receipt blob");
        Ok(StoredBlob { key, url, sha256 })
    }

    async fn get(&self, key: &str) -> ReceiptStoreResult<Vec<u8>> {
        if !is_plain_key(key) {
            return Err(ReceiptStoreError::InvalidKey(key.to_owned()));
        }
        let target = key.to_owned();
        self.run_blocking(move |dir| match dir.read(&target) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ReceiptStoreError::NotFound(target))
            }
            Err(err) => Err(ReceiptStoreError::io(err)),
        })
        .await
    }
}
