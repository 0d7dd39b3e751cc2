//! JSON account store: every user account and its comments live in a single
//! document, `username -> { password, admin, comments[] }`.
//!
//! The document is held in memory behind an async `RwLock`; every mutation
//! rewrites the whole file while the write lock is held, so in-process
//! writers are serialized. A derived per-post index keeps comment reads at
//! O(comments-for-that-post) instead of a scan over every account.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;

use quill_core::domain::{Comment, CommentEntry, User};
use quill_core::error::RepoError;
use quill_core::ports::UserRepository;

/// One account as stored in the document. The username is the map key, not
/// a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRecord {
    password: String,
    #[serde(default)]
    admin: bool,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl AccountRecord {
    fn into_user(self, username: &str) -> User {
        User {
            username: username.to_string(),
            password_hash: self.password,
            admin: self.admin,
            comments: self.comments,
        }
    }
}

impl From<User> for AccountRecord {
    fn from(user: User) -> Self {
        Self {
            password: user.password_hash,
            admin: user.admin,
            comments: user.comments,
        }
    }
}

struct Inner {
    accounts: BTreeMap<String, AccountRecord>,
    /// Derived index, post id -> comments with authors. Rebuilt on load,
    /// maintained on every mutation.
    by_post: HashMap<u64, Vec<CommentEntry>>,
}

impl Inner {
    fn rebuild_index(&mut self) {
        self.by_post.clear();
        for (username, record) in &self.accounts {
            for comment in &record.comments {
                self.by_post
                    .entry(comment.post_id)
                    .or_default()
                    .push(CommentEntry {
                        username: username.clone(),
                        comment: comment.clone(),
                    });
            }
        }
    }
}

/// Account store backed by a single JSON file.
pub struct JsonAccountStore {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl JsonAccountStore {
    /// Open the account document, treating a missing file as empty.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let path = path.into();
        let accounts = match fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        let mut inner = Inner {
            accounts,
            by_post: HashMap::new(),
        };
        inner.rebuild_index();

        Ok(Self {
            path,
            inner: RwLock::new(inner),
        })
    }

    /// Rewrite the whole document. Caller must hold the write lock.
    async fn persist(&self, inner: &Inner) -> Result<(), RepoError> {
        let json = serde_json::to_vec_pretty(&inner.accounts)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Create the admin account at startup if it does not exist yet.
    /// An existing account is left untouched, whatever its flags.
    pub async fn ensure_admin(&self, username: &str, password_hash: &str) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        if inner.accounts.contains_key(username) {
            return Ok(());
        }

        tracing::info!(username, "Bootstrapping admin account");
        inner.accounts.insert(
            username.to_string(),
            User::new_admin(username.to_string(), password_hash.to_string()).into(),
        );
        self.persist(&inner).await
    }
}

#[async_trait]
impl UserRepository for JsonAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .accounts
            .get(username)
            .cloned()
            .map(|record| record.into_user(username)))
    }

    async fn create(&self, user: User) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        if inner.accounts.contains_key(&user.username) {
            return Err(RepoError::Constraint(format!(
                "username {:?} is taken",
                user.username
            )));
        }

        let username = user.username.clone();
        let comments: Vec<Comment> = user.comments.clone();
        inner.accounts.insert(username.clone(), user.into());
        for comment in comments {
            inner
                .by_post
                .entry(comment.post_id)
                .or_default()
                .push(CommentEntry {
                    username: username.clone(),
                    comment,
                });
        }
        self.persist(&inner).await
    }

    async fn add_comment(&self, username: &str, comment: Comment) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        let record = inner.accounts.get_mut(username).ok_or(RepoError::NotFound)?;
        record.comments.push(comment.clone());

        inner
            .by_post
            .entry(comment.post_id)
            .or_default()
            .push(CommentEntry {
                username: username.to_string(),
                comment,
            });
        self.persist(&inner).await
    }

    async fn comments_for_post(&self, post_id: u64) -> Result<Vec<CommentEntry>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.by_post.get(&post_id).cloned().unwrap_or_default())
    }

    async fn all_comments(&self) -> Result<Vec<CommentEntry>, RepoError> {
        let inner = self.inner.read().await;
        let mut entries = Vec::new();
        for (username, record) in &inner.accounts {
            for comment in &record.comments {
                entries.push(CommentEntry {
                    username: username.clone(),
                    comment: comment.clone(),
                });
            }
        }
        Ok(entries)
    }

    async fn delete_comment(
        &self,
        username: &str,
        post_id: u64,
        text: &str,
    ) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        let record = inner.accounts.get_mut(username).ok_or(RepoError::NotFound)?;

        // Two identical comments are indistinguishable here; remove the first.
        let position = record
            .comments
            .iter()
            .position(|c| c.post_id == post_id && c.text == text)
            .ok_or(RepoError::NotFound)?;
        record.comments.remove(position);

        if let Some(entries) = inner.by_post.get_mut(&post_id) {
            if let Some(idx) = entries
                .iter()
                .position(|e| e.username == username && e.comment.text == text)
            {
                entries.remove(idx);
            }
            if entries.is_empty() {
                inner.by_post.remove(&post_id);
            }
        }

        self.persist(&inner).await
    }

    async fn purge_post_comments(&self, post_id: u64) -> Result<usize, RepoError> {
        let mut inner = self.inner.write().await;

        let mut removed = 0;
        for record in inner.accounts.values_mut() {
            let before = record.comments.len();
            record.comments.retain(|c| c.post_id != post_id);
            removed += before - record.comments.len();
        }
        inner.by_post.remove(&post_id);

        if removed > 0 {
            tracing::info!(post_id, removed, "Purged comments for deleted post");
            self.persist(&inner).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn comment(post_id: u64, text: &str) -> Comment {
        Comment::new(post_id, text.to_string(), Local::now().naive_local())
    }

    async fn store(dir: &tempfile::TempDir) -> JsonAccountStore {
        JsonAccountStore::open(dir.path().join("accounts.json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store
            .create(User::new("alice".into(), "$hash".into()))
            .await
            .unwrap();

        let user = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "$hash");
        assert!(!user.admin);
        assert!(user.comments.is_empty());
    }

    #[tokio::test]
    async fn duplicate_username_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store
            .create(User::new("alice".into(), "$first".into()))
            .await
            .unwrap();
        let result = store.create(User::new("alice".into(), "$second".into())).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        let user = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "$first");
    }

    #[tokio::test]
    async fn comment_on_missing_user_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let result = store.add_comment("ghost", comment(1, "hi")).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn comments_for_post_filters_by_id_across_users() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store.create(User::new("alice".into(), "$a".into())).await.unwrap();
        store.create(User::new("bob".into(), "$b".into())).await.unwrap();

        store.add_comment("alice", comment(1, "on one")).await.unwrap();
        store.add_comment("bob", comment(1, "also on one")).await.unwrap();
        store.add_comment("bob", comment(2, "on two")).await.unwrap();

        let on_one = store.comments_for_post(1).await.unwrap();
        assert_eq!(on_one.len(), 2);
        assert!(on_one.iter().all(|e| e.comment.post_id == 1));

        let on_two = store.comments_for_post(2).await.unwrap();
        assert_eq!(on_two.len(), 1);
        assert_eq!(on_two[0].username, "bob");
    }

    #[tokio::test]
    async fn all_comments_spans_every_account() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store.create(User::new("alice".into(), "$a".into())).await.unwrap();
        store.create(User::new("bob".into(), "$b".into())).await.unwrap();

        store.add_comment("alice", comment(1, "a")).await.unwrap();
        store.add_comment("bob", comment(2, "b")).await.unwrap();

        assert_eq!(store.all_comments().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_comment_removes_exactly_one_of_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store.create(User::new("alice".into(), "$a".into())).await.unwrap();

        store.add_comment("alice", comment(1, "same text")).await.unwrap();
        store.add_comment("alice", comment(1, "same text")).await.unwrap();

        store.delete_comment("alice", 1, "same text").await.unwrap();

        let remaining = store.comments_for_post(1).await.unwrap();
        assert_eq!(remaining.len(), 1);
        let user = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.comments.len(), 1);
    }

    #[tokio::test]
    async fn delete_unmatched_comment_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store.create(User::new("alice".into(), "$a".into())).await.unwrap();
        store.add_comment("alice", comment(1, "hello")).await.unwrap();

        let result = store.delete_comment("alice", 1, "different text").await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn purge_removes_comments_from_every_account() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store.create(User::new("alice".into(), "$a".into())).await.unwrap();
        store.create(User::new("bob".into(), "$b".into())).await.unwrap();

        store.add_comment("alice", comment(3, "x")).await.unwrap();
        store.add_comment("bob", comment(3, "y")).await.unwrap();
        store.add_comment("bob", comment(4, "kept")).await.unwrap();

        let removed = store.purge_post_comments(3).await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.comments_for_post(3).await.unwrap().is_empty());
        assert_eq!(store.comments_for_post(4).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn document_survives_reopen_with_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        {
            let store = JsonAccountStore::open(&path).await.unwrap();
            store.create(User::new("alice".into(), "$a".into())).await.unwrap();
            store.add_comment("alice", comment(1, "persisted")).await.unwrap();
        }

        let store = JsonAccountStore::open(&path).await.unwrap();
        let user = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.comments.len(), 1);

        let on_one = store.comments_for_post(1).await.unwrap();
        assert_eq!(on_one.len(), 1);
        assert_eq!(on_one[0].comment.text, "persisted");
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store.ensure_admin("admin", "$hash").await.unwrap();
        store.ensure_admin("admin", "$other").await.unwrap();

        let admin = store.find_by_username("admin").await.unwrap().unwrap();
        assert!(admin.admin);
        assert_eq!(admin.password_hash, "$hash");
    }
}
