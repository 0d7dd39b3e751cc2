//! Markdown rendering and HTML page construction.

pub mod markdown;
pub mod pages;

use actix_web::{HttpResponse, http::header::ContentType};

use quill_core::domain::Post;

/// A post with its markdown rendered, ready for page construction.
pub struct RenderedPost {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub content_html: String,
    pub preview_html: String,
}

impl RenderedPost {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            date: post.formatted_date(),
            content_html: markdown::render(&post.body),
            preview_html: markdown::render_preview(&post.body),
        }
    }
}

/// HTML page response; clears the flash cookie when a message was shown.
pub fn html(body: String, clear_flash: bool) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    builder.content_type(ContentType::html());
    if clear_flash {
        builder.cookie(crate::flash::removal());
    }
    builder.body(body)
}
