//! Flat-file post store: one markdown file per post.
//!
//! Layout inside the posts directory:
//! - `<id>.md` - title line, date line (`%Y-%m-%d %H:%M:%S`), markdown body
//! - `next_id` - persisted monotonic id counter
//!
//! Ids come from the counter, never from a directory listing count, so a
//! deleted post's id is never handed out again.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use tokio::fs;
use tokio::sync::Mutex;

use quill_core::domain::{DATE_FORMAT, NewPost, Post};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

const COUNTER_FILE: &str = "next_id";

/// Post store backed by a directory of `<id>.md` files.
pub struct FilePostStore {
    dir: PathBuf,
    /// Guards id allocation and all file writes.
    next_id: Mutex<u64>,
}

impl FilePostStore {
    /// Open (creating if necessary) the posts directory and load the id
    /// counter. A missing counter file is recovered as `max(existing) + 1`.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        let counter_path = dir.join(COUNTER_FILE);
        let next_id = match fs::read_to_string(&counter_path).await {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| RepoError::Malformed(format!("bad id counter: {raw:?}")))?,
            Err(e) if e.kind() == ErrorKind::NotFound => scan_max_id(&dir).await? + 1,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            dir,
            next_id: Mutex::new(next_id),
        })
    }

    fn post_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}.md"))
    }

    async fn persist_counter(&self, value: u64) -> Result<(), RepoError> {
        fs::write(self.dir.join(COUNTER_FILE), value.to_string()).await?;
        Ok(())
    }
}

/// Highest post id currently on disk, or 0 for an empty directory.
async fn scan_max_id(dir: &Path) -> Result<u64, RepoError> {
    let mut max = 0;
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if let Some(id) = post_id_of(&entry.path()) {
            max = max.max(id);
        }
    }
    Ok(max)
}

/// Parse `<id>.md` out of a path; `None` for anything else in the directory.
fn post_id_of(path: &Path) -> Option<u64> {
    if path.extension()?.to_str()? != "md" {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}

/// Parse the three-part file format: title line, date line, body.
fn parse_post(id: u64, content: &str) -> Result<Post, RepoError> {
    let mut parts = content.splitn(3, '\n');
    let title = parts
        .next()
        .ok_or_else(|| RepoError::Malformed(format!("post {id}: empty file")))?;
    let date_line = parts
        .next()
        .ok_or_else(|| RepoError::Malformed(format!("post {id}: missing date line")))?;
    let body = parts.next().unwrap_or("");

    let date = NaiveDateTime::parse_from_str(date_line.trim(), DATE_FORMAT)
        .map_err(|e| RepoError::Malformed(format!("post {id}: bad date line: {e}")))?;

    Ok(Post::new(id, title.trim().to_string(), date, body.to_string()))
}

#[async_trait]
impl PostRepository for FilePostStore {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut next_id = self.next_id.lock().await;
        let id = *next_id;

        let date = Local::now().naive_local();
        let post = Post::new(id, post.title, date, post.body);
        let content = format!("{}\n{}\n{}", post.title, post.formatted_date(), post.body);
        fs::write(self.post_path(id), content).await?;

        self.persist_counter(id + 1).await?;
        *next_id = id + 1;

        tracing::info!(id, title = %post.title, "Post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Post>, RepoError> {
        match fs::read_to_string(self.post_path(id)).await {
            Ok(content) => Ok(Some(parse_post(id, &content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(id) = post_id_of(&path) else {
                continue;
            };
            let content = fs::read_to_string(&path).await?;
            posts.push(parse_post(id, &content)?);
        }

        posts.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(posts)
    }

    async fn delete(&self, id: u64) -> Result<(), RepoError> {
        let _guard = self.next_id.lock().await;
        match fs::remove_file(self.post_path(id)).await {
            Ok(()) => {
                tracing::info!(id, "Post deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RepoError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
