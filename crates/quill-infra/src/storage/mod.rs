//! Storage implementations.

mod accounts;
mod posts;

pub use accounts::JsonAccountStore;
pub use posts::FilePostStore;
