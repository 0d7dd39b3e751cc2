//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! flat-file post storage, the JSON account document, and the
//! password/session services.

pub mod auth;
pub mod storage;

pub use auth::{Argon2PasswordService, JwtSessionService, SessionConfig};
pub use storage::{FilePostStore, JsonAccountStore};
