//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod pages;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public pages
        .route("/", web::get().to(pages::home))
        .route("/about", web::get().to(pages::about))
        .route("/contact", web::get().to(pages::contact))
        .route("/health", web::get().to(health::health_check))
        // Accounts and sessions
        .route("/signup", web::get().to(auth::signup_form))
        .route("/signup", web::post().to(auth::signup))
        .route("/login", web::get().to(auth::login_form))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::get().to(auth::logout))
        // Posts and comments
        .route("/post/{id}", web::get().to(posts::view_post))
        .route("/post/{id}", web::post().to(comments::submit_comment))
        .route("/post/{id}/comment", web::post().to(comments::submit_comment))
        // Admin
        .route("/admin", web::get().to(posts::admin_panel))
        .route("/admin", web::post().to(posts::create_post))
        .route("/delete_post/{id}", web::post().to(posts::delete_post))
        .route("/admin/comments", web::get().to(comments::moderation_panel))
        .route("/admin/delete_comment", web::post().to(comments::delete_comment));
}
