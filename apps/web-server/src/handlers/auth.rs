//! Signup, login, logout.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_core::ports::{PasswordService, SessionService};

use crate::flash::{self, Flash};
use crate::forms::{LoginForm, SignupForm};
use crate::middleware::auth;
use crate::middleware::error::AppResult;
use crate::render::{self, pages};
use crate::state::AppState;

/// GET /signup
pub async fn signup_form(req: HttpRequest) -> HttpResponse {
    let flash = flash::take(&req);
    render::html(pages::signup_page(flash), flash.is_some())
}

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    form: web::Form<SignupForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    // Validate input
    let username = form.username.trim().to_string();
    if username.is_empty() || form.password.is_empty() {
        return Ok(flash::redirect("/signup", Flash::SignupInvalid));
    }
    if form.password != form.confirm {
        return Ok(flash::redirect("/signup", Flash::SignupMismatch));
    }
    if state.users.find_by_username(&username).await?.is_some() {
        return Ok(flash::redirect("/signup", Flash::UsernameTaken));
    }

    let password_hash = passwords.hash(&form.password)?;

    match state.users.create(User::new(username.clone(), password_hash)).await {
        Ok(()) => {
            tracing::info!(%username, "Account created");
            Ok(flash::redirect("/login", Flash::AccountCreated))
        }
        // Lost the race against a concurrent signup for the same name.
        Err(RepoError::Constraint(_)) => Ok(flash::redirect("/signup", Flash::UsernameTaken)),
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(req: HttpRequest) -> HttpResponse {
    let flash = flash::take(&req);
    render::html(pages::login_page(flash), flash.is_some())
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    sessions: web::Data<Arc<dyn SessionService>>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let Some(user) = state.users.find_by_username(&form.username).await? else {
        tracing::warn!(username = %form.username, "Login rejected: unknown user");
        return Ok(flash::redirect("/login", Flash::BadCredentials));
    };

    if !passwords.verify(&form.password, &user.password_hash)? {
        tracing::warn!(username = %user.username, "Login rejected: bad password");
        return Ok(flash::redirect("/login", Flash::BadCredentials));
    }

    let token = sessions.issue(&user.username, user.admin)?;
    let target = if user.admin { "/admin" } else { "/" };

    tracing::info!(username = %user.username, admin = user.admin, "Logged in");
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, target))
        .cookie(auth::session_cookie(token))
        .cookie(flash::cookie(Flash::LoggedIn))
        .finish())
}

/// GET /logout
pub async fn logout() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .cookie(auth::clear_session_cookie())
        .cookie(flash::cookie(Flash::LoggedOut))
        .finish()
}
