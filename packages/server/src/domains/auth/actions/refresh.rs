//! Session renewal from a refresh token

use crate::common::ApiError;
use crate::domains::auth::models::User;
use crate::kernel::ServerDeps;

/// Mint a new session token for the refresh token's own subject.
///
/// The subject comes from the validated refresh token, never from any ambient
/// request identity, and must still refer to an active account.
pub async fn refresh_token(refresh_token: &str, deps: &ServerDeps) -> Result<String, ApiError> {
    let subject = deps.jwt_service.subject_of(refresh_token)?;

    let user = User::find_by_username(&subject, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Invalid refresh token".to_string()))?;

    if !user.active {
        return Err(ApiError::Unauthenticated("Account is disabled".to_string()));
    }

    deps.jwt_service.issue_session_token(&user.username)
}
