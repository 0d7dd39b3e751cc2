//! JWT session service. The token is the opaque value of the session
//! cookie; it carries the logged-in username and the admin flag.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use quill_core::ports::{AuthError, SessionClaims, SessionService};

/// Session service configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: 24,
            issuer: "quill".to_string(),
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // username
    admin: bool,
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
    iss: String, // issuer
}

/// JWT-based session service.
pub struct JwtSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl JwtSessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .unwrap_or_else(|_| "change-me-in-production".to_string());

        if secret == "change-me-in-production" {
            tracing::warn!("Using default session secret. Set SESSION_SECRET for production use.");
        }

        let config = SessionConfig {
            secret,
            expiration_hours: std::env::var("SESSION_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "quill".to_string()),
        };
        Self::new(config)
    }
}

impl SessionService for JwtSessionService {
    fn issue(&self, username: &str, admin: bool) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.expiration_hours);

        let claims = Claims {
            sub: username.to_string(),
            admin,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(SessionClaims {
            username: token_data.claims.sub,
            admin: token_data.claims.admin,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn issue_and_validate() {
        let service = JwtSessionService::new(test_config());

        let token = service.issue("alice", false).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.username, "alice");
        assert!(!claims.admin);
    }

    #[test]
    fn admin_flag_round_trips() {
        let service = JwtSessionService::new(test_config());

        let token = service.issue("root", true).unwrap();
        assert!(service.validate(&token).unwrap().admin);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = JwtSessionService::new(test_config());

        let result = service.validate("not-a-token");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn token_from_other_issuer_is_rejected() {
        let issuing = JwtSessionService::new(SessionConfig {
            secret: "same-secret".to_string(),
            expiration_hours: 1,
            issuer: "other-app".to_string(),
        });
        let validating = JwtSessionService::new(SessionConfig {
            secret: "same-secret".to_string(),
            expiration_hours: 1,
            issuer: "quill".to_string(),
        });

        let token = issuing.issue("alice", false).unwrap();
        assert!(validating.validate(&token).is_err());
    }

    #[test]
    fn expiration_seconds_matches_config() {
        let service = JwtSessionService::new(SessionConfig {
            expiration_hours: 24,
            ..test_config()
        });

        assert_eq!(service.expiration_seconds(), 86400);
    }
}
