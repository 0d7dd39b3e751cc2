use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Timestamp format used on the date line of a stored post.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Post entity - a markdown-authored article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub date: NaiveDateTime,
    /// Raw markdown source of the body.
    pub body: String,
}

impl Post {
    pub fn new(id: u64, title: String, date: NaiveDateTime, body: String) -> Self {
        Self {
            id,
            title,
            date,
            body,
        }
    }

    /// The date line as it appears in the stored file.
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// A post as submitted, before an id and date are assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl NewPost {
    /// Validate a submission. The title becomes the first line of the
    /// stored file, so it must be a single non-empty line.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if title.contains('\n') {
            return Err(DomainError::Validation("title must be a single line".into()));
        }

        Ok(Self {
            title,
            body: body.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn date_line_round_trips_through_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let post = Post::new(1, "Hello".into(), date, "World".into());

        assert_eq!(post.formatted_date(), "2024-01-01 00:00:00");
        let parsed = NaiveDateTime::parse_from_str(&post.formatted_date(), DATE_FORMAT).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn new_post_trims_and_accepts_single_line_title() {
        let post = NewPost::new("  Hello  ", "body").unwrap();
        assert_eq!(post.title, "Hello");
    }

    #[test]
    fn new_post_rejects_empty_title() {
        assert!(NewPost::new("   ", "body").is_err());
    }

    #[test]
    fn new_post_rejects_multiline_title() {
        assert!(NewPost::new("first\nsecond", "body").is_err());
    }
}
