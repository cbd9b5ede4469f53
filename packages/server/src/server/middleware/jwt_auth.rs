use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{middleware::Next, response::Response};
use tracing::debug;

use crate::common::ApiError;
use crate::domains::auth::JwtService;

/// Authenticated caller identity from a validated JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

/// JWT authentication middleware
///
/// Extracts the token from the Authorization header, verifies it, and adds
/// AuthUser to request extensions. Without a valid token the request
/// continues unauthenticated (public access); handlers that need a caller
/// extract AuthUser and reject with 401.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!("Authenticated user: {}", user.username);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Accept both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.validate(token).ok()?;

    Some(AuthUser {
        username: claims.sub,
    })
}

/// Handlers take `AuthUser` as an argument to require an authenticated
/// caller; absence rejects with 401 before the handler body runs.
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret", 3600, 86400)
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = service();
        let token = jwt_service.issue_session_token("alice").unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_some());
        assert_eq!(auth_user.unwrap().username, "alice");
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = service();
        let token = jwt_service.issue_session_token("bob").unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_some());
        assert_eq!(auth_user.unwrap().username, "bob");
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = service();
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_none());
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = service();
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_none());
    }
}
