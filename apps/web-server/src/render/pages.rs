//! Minimal server-built HTML pages. There is deliberately no template
//! engine; every page is the same shell around a content fragment.

use quill_core::domain::CommentEntry;

use crate::flash::Flash;
use crate::render::RenderedPost;

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The common page shell: nav, optional flash banner, content.
fn layout(title: &str, flash: Option<Flash>, content: &str) -> String {
    let banner = match flash {
        Some(flash) => format!(
            "<p class=\"flash {}\">{}</p>\n",
            flash.kind(),
            escape(flash.message())
        ),
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} - Quill</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a> <a href=\"/about\">About</a> \
         <a href=\"/contact\">Contact</a> <a href=\"/login\">Login</a> \
         <a href=\"/signup\">Sign up</a></nav>\n\
         {banner}<main>\n{content}\n</main>\n</body>\n</html>\n",
        escape(title),
    )
}

fn post_summary(post: &RenderedPost) -> String {
    format!(
        "<article>\n<h2><a href=\"/post/{id}\">{title}</a></h2>\n\
         <p class=\"date\">{date}</p>\n<div>{preview}</div>\n</article>\n",
        id = post.id,
        title = escape(&post.title),
        date = post.date,
        preview = post.preview_html,
    )
}

/// Home listing, newest post first.
pub fn home_page(posts: &[RenderedPost], flash: Option<Flash>) -> String {
    let mut content = String::from("<h1>Posts</h1>\n");
    if posts.is_empty() {
        content.push_str("<p>No posts yet.</p>\n");
    }
    for post in posts {
        content.push_str(&post_summary(post));
    }
    layout("Home", flash, &content)
}

/// A single post with its comments. `viewer` is the logged-in username,
/// which enables the comment form.
pub fn post_page(
    post: &RenderedPost,
    comments: &[CommentEntry],
    viewer: Option<&str>,
    flash: Option<Flash>,
) -> String {
    let mut content = format!(
        "<article>\n<h1>{title}</h1>\n<p class=\"date\">{date}</p>\n\
         <div>{body}</div>\n</article>\n<section>\n<h2>Comments</h2>\n",
        title = escape(&post.title),
        date = post.date,
        body = post.content_html,
    );

    if comments.is_empty() {
        content.push_str("<p>No comments yet.</p>\n");
    }
    for entry in comments {
        content.push_str(&format!(
            "<p class=\"comment\"><strong>{}</strong>: {}</p>\n",
            escape(&entry.username),
            escape(&entry.comment.text),
        ));
    }

    match viewer {
        Some(username) => content.push_str(&format!(
            "<form method=\"post\" action=\"/post/{id}/comment\">\n\
             <p>Commenting as <strong>{user}</strong></p>\n\
             <textarea name=\"content\" required></textarea>\n\
             <button type=\"submit\">Add comment</button>\n</form>\n",
            id = post.id,
            user = escape(username),
        )),
        None => {
            content.push_str("<p><a href=\"/login\">Log in</a> to leave a comment.</p>\n");
        }
    }
    content.push_str("</section>\n");

    layout(&post.title, flash, &content)
}

pub fn signup_page(flash: Option<Flash>) -> String {
    layout(
        "Sign up",
        flash,
        "<h1>Sign up</h1>\n\
         <form method=\"post\" action=\"/signup\">\n\
         <input name=\"username\" placeholder=\"Username\" required>\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
         <input name=\"confirm\" type=\"password\" placeholder=\"Confirm password\" required>\n\
         <button type=\"submit\">Sign up</button>\n</form>\n",
    )
}

pub fn login_page(flash: Option<Flash>) -> String {
    layout(
        "Log in",
        flash,
        "<h1>Log in</h1>\n\
         <form method=\"post\" action=\"/login\">\n\
         <input name=\"username\" placeholder=\"Username\" required>\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
         <button type=\"submit\">Log in</button>\n</form>\n",
    )
}

/// Admin panel: post list with delete buttons, plus the creation form.
pub fn admin_page(posts: &[RenderedPost], flash: Option<Flash>) -> String {
    let mut content = String::from(
        "<h1>Admin</h1>\n<p><a href=\"/admin/comments\">Moderate comments</a> \
         <a href=\"/logout\">Log out</a></p>\n<h2>New post</h2>\n\
         <form method=\"post\" action=\"/admin\">\n\
         <input name=\"title\" placeholder=\"Title\" required>\n\
         <textarea name=\"content\" placeholder=\"Markdown body\"></textarea>\n\
         <button type=\"submit\">Create post</button>\n</form>\n<h2>Posts</h2>\n",
    );

    if posts.is_empty() {
        content.push_str("<p>No posts yet.</p>\n");
    }
    for post in posts {
        content.push_str(&format!(
            "<p><a href=\"/post/{id}\">{title}</a> ({date})\n\
             <form method=\"post\" action=\"/delete_post/{id}\">\
             <button type=\"submit\">Delete</button></form></p>\n",
            id = post.id,
            title = escape(&post.title),
            date = post.date,
        ));
    }

    layout("Admin", flash, &content)
}

/// Moderation view: every comment system-wide, each with a delete form.
pub fn comments_page(entries: &[CommentEntry], flash: Option<Flash>) -> String {
    let mut content = String::from("<h1>All comments</h1>\n");
    if entries.is_empty() {
        content.push_str("<p>No comments.</p>\n");
    }
    for entry in entries {
        content.push_str(&format!(
            "<p class=\"comment\"><strong>{user}</strong> on \
             <a href=\"/post/{id}\">post {id}</a>: {text}\n\
             <form method=\"post\" action=\"/admin/delete_comment\">\
             <input type=\"hidden\" name=\"username\" value=\"{user}\">\
             <input type=\"hidden\" name=\"post_id\" value=\"{id}\">\
             <input type=\"hidden\" name=\"content\" value=\"{text}\">\
             <button type=\"submit\">Delete</button></form></p>\n",
            user = escape(&entry.username),
            id = entry.comment.post_id,
            text = escape(&entry.comment.text),
        ));
    }

    layout("Comments", flash, &content)
}

pub fn about_page(flash: Option<Flash>) -> String {
    layout(
        "About",
        flash,
        "<h1>About</h1>\n<p>Quill is a small markdown blog.</p>\n",
    )
}

pub fn contact_page(flash: Option<Flash>) -> String {
    layout(
        "Contact",
        flash,
        "<h1>Contact</h1>\n<p>Reach the author at the usual places.</p>\n",
    )
}

pub fn error_page(status: u16, title: &str, detail: &str) -> String {
    layout(
        title,
        None,
        &format!(
            "<h1>{status} {title}</h1>\n<p>{detail}</p>\n",
            title = escape(title),
            detail = escape(detail),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<b>&"it's"</b>"#),
            "&lt;b&gt;&amp;&quot;it&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn post_titles_are_escaped_in_listings() {
        let post = RenderedPost {
            id: 1,
            title: "<script>alert(1)</script>".to_string(),
            date: "2024-01-01 00:00:00".to_string(),
            content_html: String::new(),
            preview_html: String::new(),
        };
        let page = home_page(&[post], None);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn flash_banner_is_rendered_once_present() {
        let page = login_page(Some(Flash::BadCredentials));
        assert!(page.contains("Incorrect username or password."));
        assert!(page.contains("class=\"flash error\""));

        let without = login_page(None);
        assert!(!without.contains("class=\"flash"));
    }
}
