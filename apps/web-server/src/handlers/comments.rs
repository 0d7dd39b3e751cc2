//! Comment submission and moderation.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Local;

use quill_core::domain::Comment;
use quill_core::error::RepoError;

use crate::flash::{self, Flash};
use crate::forms::{CommentForm, DeleteCommentForm};
use crate::middleware::auth::{AdminIdentity, Identity};
use crate::middleware::error::AppResult;
use crate::render::{self, pages};
use crate::state::AppState;

/// POST /post/{id}/comment (also mounted at POST /post/{id}).
///
/// The target post is not checked for existence; the original system
/// accepted dangling comments and cleanup happens on post deletion.
pub async fn submit_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<u64>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let location = format!("/post/{post_id}");

    let text = form.into_inner().content.trim().to_string();
    if text.is_empty() {
        return Ok(flash::redirect(&location, Flash::CommentEmpty));
    }

    let comment = Comment::new(post_id, text, Local::now().naive_local());
    state.users.add_comment(&identity.username, comment).await?;

    tracing::info!(post_id, username = %identity.username, "Comment added");
    Ok(flash::redirect(&location, Flash::CommentAdded))
}

/// GET /admin/comments - every comment system-wide.
pub async fn moderation_panel(
    req: HttpRequest,
    _admin: AdminIdentity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let entries = state.users.all_comments().await?;

    let flash = flash::take(&req);
    Ok(render::html(
        pages::comments_page(&entries, flash),
        flash.is_some(),
    ))
}

/// POST /admin/delete_comment - remove one comment matched by the
/// (username, post id, content) tuple.
pub async fn delete_comment(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    form: web::Form<DeleteCommentForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match state
        .users
        .delete_comment(&form.username, form.post_id, &form.content)
        .await
    {
        Ok(()) => Ok(flash::redirect("/admin/comments", Flash::CommentDeleted)),
        Err(RepoError::NotFound) => {
            tracing::warn!(
                username = %form.username,
                post_id = form.post_id,
                "Delete requested for missing comment"
            );
            Ok(flash::redirect("/admin/comments", Flash::CommentMissing))
        }
        Err(e) => Err(e.into()),
    }
}
