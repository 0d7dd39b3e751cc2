//! Post management: admin panel, viewing, creation, deletion.

use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::domain::NewPost;
use quill_core::error::RepoError;

use crate::flash::{self, Flash};
use crate::forms::NewPostForm;
use crate::middleware::auth::{AdminIdentity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::render::{self, RenderedPost, pages};
use crate::state::AppState;

/// GET /admin - post list and creation form.
pub async fn admin_panel(
    req: HttpRequest,
    _admin: AdminIdentity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let posts: Vec<RenderedPost> = state
        .posts
        .list()
        .await?
        .iter()
        .map(RenderedPost::from_post)
        .collect();

    let flash = flash::take(&req);
    Ok(render::html(
        pages::admin_page(&posts, flash),
        flash.is_some(),
    ))
}

/// POST /admin - create a post.
pub async fn create_post(
    admin: AdminIdentity,
    state: web::Data<AppState>,
    form: web::Form<NewPostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let Ok(new_post) = NewPost::new(form.title, form.content) else {
        return Ok(flash::redirect("/admin", Flash::PostInvalidTitle));
    };

    let post = state.posts.create(new_post).await?;
    tracing::info!(id = post.id, author = %admin.0.username, "Post published");

    Ok(flash::redirect("/admin", Flash::PostCreated))
}

/// GET /post/{id} - rendered post with its comments.
pub async fn view_post(
    req: HttpRequest,
    viewer: OptionalIdentity,
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;
    let comments = state.users.comments_for_post(id).await?;

    let rendered = RenderedPost::from_post(&post);
    let viewer = viewer.0.as_ref().map(|identity| identity.username.as_str());

    let flash = flash::take(&req);
    Ok(render::html(
        pages::post_page(&rendered, &comments, viewer, flash),
        flash.is_some(),
    ))
}

/// POST /delete_post/{id} - delete a post and purge its comments.
pub async fn delete_post(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.delete(id).await {
        Ok(()) => {
            state.users.purge_post_comments(id).await?;
            Ok(flash::redirect("/admin", Flash::PostDeleted))
        }
        Err(RepoError::NotFound) => {
            tracing::warn!(id, "Delete requested for missing post");
            Ok(flash::redirect("/admin", Flash::PostMissing))
        }
        Err(e) => Err(e.into()),
    }
}
