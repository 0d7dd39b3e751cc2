//! Public pages: home listing, about, contact.

use actix_web::{HttpRequest, HttpResponse, web};

use crate::flash;
use crate::middleware::error::AppResult;
use crate::render::{self, RenderedPost, pages};
use crate::state::AppState;

/// GET / - every post, newest id first, with rendered previews.
pub async fn home(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<RenderedPost> = state
        .posts
        .list()
        .await?
        .iter()
        .map(RenderedPost::from_post)
        .collect();

    let flash = flash::take(&req);
    Ok(render::html(pages::home_page(&posts, flash), flash.is_some()))
}

/// GET /about
pub async fn about(req: HttpRequest) -> HttpResponse {
    let flash = flash::take(&req);
    render::html(pages::about_page(flash), flash.is_some())
}

/// GET /contact
pub async fn contact(req: HttpRequest) -> HttpResponse {
    let flash = flash::take(&req);
    render::html(pages::contact_page(flash), flash.is_some())
}
