use serde::{Deserialize, Serialize};

use crate::domain::Comment;

/// User entity - an account keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub admin: bool,
    pub comments: Vec<Comment>,
}

impl User {
    /// Create a new non-admin account with no comments.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            admin: false,
            comments: Vec::new(),
        }
    }

    /// Create an admin account (startup bootstrap only; signup never grants this).
    pub fn new_admin(username: String, password_hash: String) -> Self {
        Self {
            admin: true,
            ..Self::new(username, password_hash)
        }
    }
}
