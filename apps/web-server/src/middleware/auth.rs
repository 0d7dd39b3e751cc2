//! Session extractors.
//!
//! The session travels as a JWT in an HttpOnly cookie. Handlers declare
//! what they need: `Identity` (any logged-in user), `AdminIdentity`
//! (admin flag set), or `OptionalIdentity` (never fails).

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, http::StatusCode,
    http::header::ContentType,
};

use quill_core::ports::{AuthError, SessionService};

use crate::flash::{self, Flash};
use crate::render::pages;

pub const SESSION_COOKIE: &str = "session";

/// Session cookie for a freshly issued token.
pub fn session_cookie(token: String) -> actix_web::cookie::Cookie<'static> {
    actix_web::cookie::Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish()
}

/// Removal cookie ending the session.
pub fn clear_session_cookie() -> actix_web::cookie::Cookie<'static> {
    let mut cookie = actix_web::cookie::Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// Authenticated user identity.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub admin: bool,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            AuthError::MissingSession | AuthError::SessionExpired | AuthError::InvalidToken(_) => {
                StatusCode::SEE_OTHER
            }
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match &self.0 {
            // No session, or a stale one: back to the login form.
            AuthError::MissingSession | AuthError::SessionExpired | AuthError::InvalidToken(_) => {
                HttpResponse::SeeOther()
                    .insert_header((actix_web::http::header::LOCATION, "/login"))
                    .cookie(flash::cookie(Flash::LoginRequired))
                    .cookie(clear_session_cookie())
                    .finish()
            }
            AuthError::InsufficientPermissions => HttpResponse::Forbidden()
                .content_type(ContentType::html())
                .body(pages::error_page(
                    403,
                    "Forbidden",
                    "Administrator access is required.",
                )),
            _ => HttpResponse::InternalServerError()
                .content_type(ContentType::html())
                .body(pages::error_page(
                    500,
                    "Internal Server Error",
                    "Something went wrong.",
                )),
        }
    }
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, AuthenticationError> {
    let sessions = req
        .app_data::<actix_web::web::Data<Arc<dyn SessionService>>>()
        .ok_or_else(|| {
            tracing::error!("SessionService not found in app data");
            AuthenticationError(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            ))
        })?;

    let cookie = req
        .cookie(SESSION_COOKIE)
        .ok_or(AuthenticationError(AuthError::MissingSession))?;

    let claims = sessions
        .validate(cookie.value())
        .map_err(AuthenticationError)?;

    Ok(Identity {
        username: claims.username,
        admin: claims.admin,
    })
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

/// Identity that additionally requires the admin flag.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

impl FromRequest for AdminIdentity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req).and_then(|identity| {
            if identity.admin {
                Ok(AdminIdentity(identity))
            } else {
                Err(AuthenticationError(AuthError::InsufficientPermissions))
            }
        }))
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(identity_from_request(req).ok())))
    }
}
