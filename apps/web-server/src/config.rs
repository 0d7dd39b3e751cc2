//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `<id>.md` post files.
    pub posts_dir: PathBuf,
    /// Path of the JSON account document.
    pub accounts_file: PathBuf,
    /// Admin account bootstrapped at startup, if both are set.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            posts_dir: env::var("POSTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("posts")),
            accounts_file: env::var("ACCOUNTS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("accounts.json")),
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        }
    }
}
