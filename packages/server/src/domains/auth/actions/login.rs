//! Login and logout

use tracing::info;

use crate::common::ApiError;
use crate::domains::auth::models::User;
use crate::domains::auth::password::verify_password;
use crate::domains::auth::types::{AuthResponse, LoginRequest};
use crate::kernel::ServerDeps;

/// Message for a login blocked on verification state, if any
fn unverified_message(email_verified: bool, mobile_verified: bool) -> Option<&'static str> {
    match (email_verified, mobile_verified) {
        (false, false) => Some("Both email and mobile number need to be verified"),
        (false, true) => Some("Email needs to be verified"),
        (true, false) => Some("Mobile number needs to be verified"),
        (true, true) => None,
    }
}

/// Authenticate and mint a session + refresh token pair.
///
/// Unknown username and wrong password fail identically. Both verification
/// flags must be set before tokens are issued.
pub async fn login(request: LoginRequest, deps: &ServerDeps) -> Result<AuthResponse, ApiError> {
    fn bad_credentials() -> ApiError {
        ApiError::Unauthenticated("Invalid username or password".to_string())
    }

    let user = User::find_by_username(&request.username, &deps.db_pool)
        .await?
        .ok_or_else(bad_credentials)?;

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(bad_credentials());
    }

    if !user.active {
        return Err(ApiError::Unauthenticated("Account is disabled".to_string()));
    }

    if let Some(message) = unverified_message(user.email_verified, user.mobile_verified) {
        return Err(ApiError::Unverified(message.to_string()));
    }

    let token = deps.jwt_service.issue_session_token(&user.username)?;
    let refresh_token = deps.jwt_service.issue_refresh_token(&user.username)?;

    User::touch_last_login(user.id, &deps.db_pool).await?;

    info!("User {} logged in", user.username);

    Ok(AuthResponse {
        token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: deps.jwt_service.session_expiration_secs(),
        username: user.username,
        email_verified: user.email_verified,
        mobile_verified: user.mobile_verified,
    })
}

/// Stateless logout: there is nothing to revoke server-side, the client
/// discards its tokens.
pub fn logout() {
    info!("User logged out successfully");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unverified_message_selection() {
        assert_eq!(
            unverified_message(false, false),
            Some("Both email and mobile number need to be verified")
        );
        assert_eq!(
            unverified_message(false, true),
            Some("Email needs to be verified")
        );
        assert_eq!(
            unverified_message(true, false),
            Some("Mobile number needs to be verified")
        );
        assert_eq!(unverified_message(true, true), None);
    }
}
