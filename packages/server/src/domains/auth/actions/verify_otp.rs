//! Redeem a verification code and flip the matching account flag

use chrono::Utc;
use tracing::info;

use crate::common::ApiError;
use crate::domains::auth::models::{User, Verification, VerificationChannel};
use crate::kernel::ServerDeps;

/// Redeem `code` for `(username, channel)`.
///
/// Wrong, absent, and already-used codes all fail identically so the endpoint
/// cannot be used as an oracle. An expired code is discarded and reported as
/// expired. The code consumption and the account-flag flip share one
/// transaction; the consumption is a compare-and-swap, so of two concurrent
/// redemptions exactly one succeeds.
pub async fn verify_otp(
    username: &str,
    code: &str,
    channel: VerificationChannel,
    deps: &ServerDeps,
) -> Result<(), ApiError> {
    let user = User::find_by_username(username, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User not found with username: {}", username)))?;

    let verification = Verification::find_live_unused_by_code(user.id, channel, code, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::InvalidCode("Invalid or expired verification code".to_string()))?;

    // The expiry decision uses a single "now" read; there is no grace window.
    let now = Utc::now();
    if verification.is_expired_at(now) {
        verification.discard(&deps.db_pool).await?;
        return Err(ApiError::Expired("Verification code has expired".to_string()));
    }

    let mut tx = deps.db_pool.begin().await?;

    let consumed = verification.consume(&mut *tx).await?;
    if !consumed {
        // Lost the race to a concurrent redemption
        tx.rollback().await?;
        return Err(ApiError::InvalidCode(
            "Invalid or expired verification code".to_string(),
        ));
    }

    match channel {
        VerificationChannel::Email => User::mark_email_verified(user.id, &mut *tx).await?,
        VerificationChannel::Mobile => User::mark_mobile_verified(user.id, &mut *tx).await?,
    }

    tx.commit().await?;

    info!("{:?} verified for user {}", channel, user.username);
    Ok(())
}
