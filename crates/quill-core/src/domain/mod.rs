//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{Comment, CommentEntry};
pub use post::{DATE_FORMAT, NewPost, Post};
pub use user::User;
