use async_trait::async_trait;

use crate::domain::{Comment, CommentEntry, NewPost, Post, User};
use crate::error::RepoError;

/// Post repository - a directory of markdown files behind this trait.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a post, allocating the next id. Returns the stored post.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Find a post by id.
    async fn find_by_id(&self, id: u64) -> Result<Option<Post>, RepoError>;

    /// All posts, sorted descending by id (newest first).
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Delete a post by id. `RepoError::NotFound` if no such post exists.
    async fn delete(&self, id: u64) -> Result<(), RepoError>;
}

/// User and comment repository - the single accounts document behind this trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Create an account. `RepoError::Constraint` if the username is taken.
    async fn create(&self, user: User) -> Result<(), RepoError>;

    /// Append a comment to the named user's record.
    async fn add_comment(&self, username: &str, comment: Comment) -> Result<(), RepoError>;

    /// All comments targeting the given post, with their authors.
    async fn comments_for_post(&self, post_id: u64) -> Result<Vec<CommentEntry>, RepoError>;

    /// Every comment system-wide, for moderation.
    async fn all_comments(&self) -> Result<Vec<CommentEntry>, RepoError>;

    /// Delete exactly one comment matching the (username, post id, text)
    /// tuple. `RepoError::NotFound` if nothing matches.
    async fn delete_comment(
        &self,
        username: &str,
        post_id: u64,
        text: &str,
    ) -> Result<(), RepoError>;

    /// Remove every comment referencing the given post from every account.
    /// Returns the number of comments removed.
    async fn purge_post_comments(&self, post_id: u64) -> Result<usize, RepoError>;
}
