//! Runtime configuration read from the process environment.

use camino::Utf8PathBuf;
use std::collections::HashMap;
use std::net::SocketAddr;
use thiserror::Error;

const DEV_SECRET_KEY: &str = "development-secret-key-change-me";
const DEV_LOGIN_KEY: &str = "key-012345678910111213141516171819";
const DEFAULT_LOGIN_URL: &str = "https://login.datasektionen.se";
const DEFAULT_PLS_URL: &str = "https://pls.datasektionen.se";
const DEFAULT_SPAM_URL: &str = "https://spam.datasektionen.se";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_RECEIPTS_DIR: &str = "receipts";
const DEFAULT_RECEIPTS_BASE_URL: &str = "/receipts";
const DEFAULT_DB_PART: &str = "cashflow";
const PERMISSION_SYSTEM: &str = "cashflow";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was present but could not be parsed.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Parse failure.
        reason: String,
    },
}

/// Settings for the whole service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Connection string for `PostgreSQL`.
    pub database_url: String,
    /// Key used to sign session tokens.
    pub secret_key: String,
    /// Base URL of the login service used to verify tokens.
    pub login_url: String,
    /// Base URL members are redirected to for signing in.
    pub login_frontend_url: String,
    /// API key for the login service.
    pub login_key: String,
    /// Base URL of the permission service.
    pub pls_url: String,
    /// System name roles are registered under.
    pub pls_system: String,
    /// Base URL of the mail service.
    pub spam_url: String,
    /// API key for the mail service.
    pub spam_api_key: String,
    /// Whether comment notifications are emailed.
    pub send_emails: bool,
    /// Directory receipt files are stored in.
    pub receipts_dir: Utf8PathBuf,
    /// Public URL prefix receipt files are served under.
    pub receipts_base_url: String,
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration from a fixed variable table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let or_default =
            |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_owned());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                or_default("DB_USER", DEFAULT_DB_PART),
                or_default("DB_PASS", DEFAULT_DB_PART),
                or_default("DB_HOST", "localhost"),
                or_default("DB_PORT", "5432"),
                or_default("DB_NAME", DEFAULT_DB_PART),
            )
        });
        let login_url = or_default("LOGIN_URL", DEFAULT_LOGIN_URL);
        let bind_raw = or_default("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw.parse().map_err(|err: std::net::AddrParseError| {
            ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: err.to_string(),
            }
        })?;

        Ok(Self {
            database_url,
            secret_key: secret(get("SECRET_KEY"), "SECRET_KEY", DEV_SECRET_KEY),
            login_frontend_url: get("LOGIN_FRONTEND_URL").unwrap_or_else(|| login_url.clone()),
            login_url,
            login_key: secret(get("LOGIN_KEY"), "LOGIN_KEY", DEV_LOGIN_KEY),
            pls_url: or_default("PLS_URL", DEFAULT_PLS_URL),
            pls_system: or_default("PLS_SYSTEM", PERMISSION_SYSTEM),
            spam_url: or_default("SPAM_URL", DEFAULT_SPAM_URL),
            spam_api_key: get("SPAM_API_KEY").unwrap_or_default(),
            send_emails: get("SEND_EMAILS").is_some_and(|value| value == "True"),
            receipts_dir: Utf8PathBuf::from(or_default("RECEIPTS_DIR", DEFAULT_RECEIPTS_DIR)),
            receipts_base_url: or_default("RECEIPTS_BASE_URL", DEFAULT_RECEIPTS_BASE_URL),
            bind_addr,
        })
    }
}

fn secret(value: Option<String>, name: &str, fallback: &str) -> String {
    value.unwrap_or_else(|| {
        tracing::warn!(variable = name, "not set; using development default");
        fallback.to_owned()
    })
}
