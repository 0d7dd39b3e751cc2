use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Comment entity - stored nested inside its author's account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Id of the post this comment targets. Not validated against post
    /// existence at submission time; post deletion purges by this id.
    pub post_id: u64,
    pub text: String,
    /// Absent in records written before timestamps were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Comment {
    pub fn new(post_id: u64, text: String, created_at: NaiveDateTime) -> Self {
        Self {
            post_id,
            text,
            created_at: Some(created_at),
        }
    }
}

/// A comment together with its author, as surfaced by per-post and
/// system-wide reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentEntry {
    pub username: String,
    pub comment: Comment,
}
