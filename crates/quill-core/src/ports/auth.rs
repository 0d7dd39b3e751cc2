//! Authentication and session ports.

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub username: String,
    pub admin: bool,
    pub exp: i64,
}

/// Session token service. Tokens are opaque strings carried in a cookie.
pub trait SessionService: Send + Sync {
    /// Issue a session token for a logged-in user.
    fn issue(&self, username: &str, admin: bool) -> Result<String, AuthError>;

    /// Validate and decode a session token.
    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Lifetime of issued tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Missing session")]
    MissingSession,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
