//! Issue and deliver verification codes

use rand::rngs::OsRng;
use rand::Rng;
use tracing::{error, info};

use crate::common::ApiError;
use crate::domains::auth::models::{User, Verification, VerificationChannel};
use crate::kernel::ServerDeps;

/// Generate a numeric code: one uniformly random digit per position, from the
/// OS CSPRNG. Leading zeros are allowed.
pub fn generate_code(length: u32) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Issue an email verification code and deliver it best-effort.
///
/// Delivery failure is logged, never surfaced: the code stays valid and the
/// user can request a resend.
pub async fn send_email_otp(user: &User, deps: &ServerDeps) -> Result<(), ApiError> {
    let code = generate_code(deps.otp_length);
    Verification::issue(
        user.id,
        VerificationChannel::Email,
        &code,
        deps.otp_expiration_secs,
        &deps.db_pool,
    )
    .await?;

    let body = format!(
        "Your verification code is: {}\nThis code will expire in {} minutes.",
        code,
        deps.otp_expiration_secs / 60
    );

    match deps
        .mailer
        .send_email(&user.email, "Email Verification Code", &body)
        .await
    {
        Ok(()) => info!("Verification email sent to: {}", user.email),
        Err(e) => error!("Failed to send verification email: {}", e),
    }

    Ok(())
}

/// Issue a mobile verification code and deliver it best-effort over the SMS
/// channel (a logging placeholder until a real gateway is wired in).
pub async fn send_mobile_otp(user: &User, deps: &ServerDeps) -> Result<(), ApiError> {
    let code = generate_code(deps.otp_length);
    Verification::issue(
        user.id,
        VerificationChannel::Mobile,
        &code,
        deps.otp_expiration_secs,
        &deps.db_pool,
    )
    .await?;

    let body = format!("Your verification code is: {}", code);

    match deps.sms.send_sms(&user.mobile_number, &body).await {
        Ok(()) => info!("Verification SMS queued for {}", user.mobile_number),
        Err(e) => error!("Failed to send verification SMS: {}", e),
    }

    Ok(())
}

/// Re-issue the code for a channel, superseding any unused one
pub async fn resend_otp(
    username: &str,
    channel: VerificationChannel,
    deps: &ServerDeps,
) -> Result<(), ApiError> {
    let user = User::find_by_username(username, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User not found with username: {}", username)))?;

    match channel {
        VerificationChannel::Email => send_email_otp(&user, deps).await,
        VerificationChannel::Mobile => send_mobile_otp(&user, deps).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_length() {
        assert_eq!(generate_code(6).len(), 6);
        assert_eq!(generate_code(4).len(), 4);
        assert_eq!(generate_code(8).len(), 8);
    }

    #[test]
    fn test_generate_code_digits_only() {
        for _ in 0..100 {
            let code = generate_code(6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()), "code {}", code);
        }
    }
}
