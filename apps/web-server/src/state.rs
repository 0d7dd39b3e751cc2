//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PasswordService, PostRepository, UserRepository};
use quill_infra::{FilePostStore, JsonAccountStore};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Open the stores and bootstrap the configured admin account.
    pub async fn new(
        config: &AppConfig,
        passwords: &dyn PasswordService,
    ) -> anyhow::Result<Self> {
        let posts = FilePostStore::open(&config.posts_dir).await?;
        let accounts = JsonAccountStore::open(&config.accounts_file).await?;

        match (&config.admin_username, &config.admin_password) {
            (Some(username), Some(password)) => {
                let hash = passwords.hash(password)?;
                accounts.ensure_admin(username, &hash).await?;
            }
            _ => {
                tracing::warn!(
                    "ADMIN_USERNAME/ADMIN_PASSWORD not set; no admin account bootstrapped"
                );
            }
        }

        tracing::info!("Application state initialized");

        Ok(Self {
            posts: Arc::new(posts),
            users: Arc::new(accounts),
        })
    }
}
