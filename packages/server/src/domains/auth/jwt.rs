use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::common::ApiError;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub iat: i64,    // Issued at timestamp
    pub exp: i64,    // Expiration timestamp
}

/// JWT Service - creates and verifies session and refresh tokens
///
/// Tokens are stateless: validity is a function of the signature and the
/// expiry claim alone. Session and refresh tokens share a shape and differ
/// only in lifetime.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expiration_secs: i64,
    refresh_expiration_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, session_expiration_secs: i64, refresh_expiration_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_expiration_secs,
            refresh_expiration_secs,
        }
    }

    /// Session token lifetime in seconds (reported to clients)
    pub fn session_expiration_secs(&self) -> i64 {
        self.session_expiration_secs
    }

    /// Create a session token for a subject
    pub fn issue_session_token(&self, subject: &str) -> Result<String, ApiError> {
        self.issue(subject, self.session_expiration_secs)
    }

    /// Create a refresh token for a subject
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, ApiError> {
        self.issue(subject, self.refresh_expiration_secs)
    }

    fn issue(&self, subject: &str, ttl_secs: i64) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl_secs,
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(e.into()))
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Failure reasons are distinguished for logging only; every failure maps
    /// to the same unauthenticated outcome.
    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(Algorithm::HS512);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => error!("Invalid JWT signature: {}", e),
                    ErrorKind::ExpiredSignature => error!("JWT token is expired: {}", e),
                    ErrorKind::InvalidAlgorithm => error!("JWT token is unsupported: {}", e),
                    ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_)
                    | ErrorKind::Utf8(_) => error!("Invalid JWT token: {}", e),
                    _ => error!("JWT validation failed: {}", e),
                }
                ApiError::Unauthenticated("Invalid or expired token".to_string())
            })
    }

    /// Subject of a token, after full validation
    pub fn subject_of(&self, token: &str) -> Result<String, ApiError> {
        Ok(self.validate(token)?.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret_key", 3600, 86400)
    }

    #[test]
    fn test_issue_and_validate_session_token() {
        let service = service();
        let token = service.issue_session_token("alice").unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_refresh_token_has_longer_lifetime() {
        let service = service();
        let token = service.issue_refresh_token("alice").unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn test_subject_of() {
        let service = service();
        let token = service.issue_session_token("bob").unwrap();
        assert_eq!(service.subject_of(&token).unwrap(), "bob");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service1 = JwtService::new("secret1", 3600, 86400);
        let service2 = JwtService::new("secret2", 3600, 86400);

        let token = service1.issue_session_token("alice").unwrap();
        assert!(service2.validate(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = service();
        assert!(service.validate("not_a_token").is_err());
        assert!(service.subject_of("not_a_token").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative lifetime puts the expiry well in the past, beyond any
        // validation leeway.
        let service = JwtService::new("test_secret_key", -3600, -3600);
        let token = service.issue_session_token("alice").unwrap();

        let err = service.validate(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = service();
        let mut token = service.issue_session_token("alice").unwrap();
        token.replace_range(0..2, "xx");
        assert!(service.validate(&token).is_err());
    }
}
