//! Flash messages carried across a redirect in a short-lived cookie.
//!
//! Only a message code travels in the cookie; the user-visible text lives
//! here, so no free-form text has to survive cookie value encoding. The
//! cookie is cleared by the page that displays the message.

use actix_web::{HttpRequest, HttpResponse, cookie::Cookie, http::header};

pub const FLASH_COOKIE: &str = "flash";

/// One-shot user-facing message shown after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    AccountCreated,
    SignupMismatch,
    SignupInvalid,
    UsernameTaken,
    LoginRequired,
    BadCredentials,
    LoggedIn,
    LoggedOut,
    PostCreated,
    PostInvalidTitle,
    PostDeleted,
    PostMissing,
    CommentAdded,
    CommentEmpty,
    CommentDeleted,
    CommentMissing,
}

impl Flash {
    /// Stable code stored in the cookie value.
    pub fn code(self) -> &'static str {
        match self {
            Flash::AccountCreated => "account_created",
            Flash::SignupMismatch => "signup_mismatch",
            Flash::SignupInvalid => "signup_invalid",
            Flash::UsernameTaken => "username_taken",
            Flash::LoginRequired => "login_required",
            Flash::BadCredentials => "bad_credentials",
            Flash::LoggedIn => "logged_in",
            Flash::LoggedOut => "logged_out",
            Flash::PostCreated => "post_created",
            Flash::PostInvalidTitle => "post_invalid_title",
            Flash::PostDeleted => "post_deleted",
            Flash::PostMissing => "post_missing",
            Flash::CommentAdded => "comment_added",
            Flash::CommentEmpty => "comment_empty",
            Flash::CommentDeleted => "comment_deleted",
            Flash::CommentMissing => "comment_missing",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "account_created" => Flash::AccountCreated,
            "signup_mismatch" => Flash::SignupMismatch,
            "signup_invalid" => Flash::SignupInvalid,
            "username_taken" => Flash::UsernameTaken,
            "login_required" => Flash::LoginRequired,
            "bad_credentials" => Flash::BadCredentials,
            "logged_in" => Flash::LoggedIn,
            "logged_out" => Flash::LoggedOut,
            "post_created" => Flash::PostCreated,
            "post_invalid_title" => Flash::PostInvalidTitle,
            "post_deleted" => Flash::PostDeleted,
            "post_missing" => Flash::PostMissing,
            "comment_added" => Flash::CommentAdded,
            "comment_empty" => Flash::CommentEmpty,
            "comment_deleted" => Flash::CommentDeleted,
            "comment_missing" => Flash::CommentMissing,
            _ => return None,
        })
    }

    /// CSS class of the flash banner.
    pub fn kind(self) -> &'static str {
        match self {
            Flash::AccountCreated
            | Flash::LoggedIn
            | Flash::LoggedOut
            | Flash::PostCreated
            | Flash::PostDeleted
            | Flash::CommentAdded
            | Flash::CommentDeleted => "success",
            _ => "error",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::AccountCreated => "Account created. Please log in.",
            Flash::SignupMismatch => "Passwords do not match.",
            Flash::SignupInvalid => "Username and password must not be empty.",
            Flash::UsernameTaken => "That username is already taken.",
            Flash::LoginRequired => "Please log in to access this page.",
            Flash::BadCredentials => "Incorrect username or password. Please try again.",
            Flash::LoggedIn => "Successfully logged in!",
            Flash::LoggedOut => "You have been logged out.",
            Flash::PostCreated => "Post created successfully!",
            Flash::PostInvalidTitle => "Post title must be a single non-empty line.",
            Flash::PostDeleted => "Post deleted successfully!",
            Flash::PostMissing => "Post not found!",
            Flash::CommentAdded => "Comment added.",
            Flash::CommentEmpty => "Comment text must not be empty.",
            Flash::CommentDeleted => "Comment deleted.",
            Flash::CommentMissing => "Comment not found.",
        }
    }
}

/// Cookie carrying the flash code.
pub fn cookie(flash: Flash) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, flash.code()).path("/").finish()
}

/// Removal cookie, attached by pages that displayed the message.
pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// 303 redirect carrying a flash message.
pub fn redirect(location: &str, flash: Flash) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(cookie(flash))
        .finish()
}

/// Read the pending flash message off the request, if any.
pub fn take(req: &HttpRequest) -> Option<Flash> {
    req.cookie(FLASH_COOKIE)
        .and_then(|c| Flash::from_code(c.value()))
}
