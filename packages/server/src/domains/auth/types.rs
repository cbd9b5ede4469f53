//! Auth domain wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domains::auth::models::{User, UserRole};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(length(min = 6, max = 100, message = "Password must be between 6 and 100 characters"))]
    pub password: String,

    #[validate(email(message = "Email should be valid"))]
    pub email: String,

    // Checked with is_valid_mobile_number in the register action
    pub mobile_number: String,

    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

/// Resend request; `channel` is "email" or "mobile"
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "OTP type is required"))]
    pub channel: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub username: String,
    pub email_verified: bool,
    pub mobile_verified: bool,
}

/// Public view of an account: everything except the password hash
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub mobile_number: String,
    pub full_name: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub mobile_verified: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            mobile_number: user.mobile_number,
            full_name: user.full_name,
            role: user.role,
            email_verified: user.email_verified,
            mobile_verified: user.mobile_verified,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

/// Mobile numbers: optional leading +, then 10-15 digits
pub fn is_valid_mobile_number(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_number_validation() {
        assert!(is_valid_mobile_number("+15551234567"));
        assert!(is_valid_mobile_number("15551234567"));
        assert!(is_valid_mobile_number("0123456789"));

        assert!(!is_valid_mobile_number("12345"));
        assert!(!is_valid_mobile_number("+1555123456789012"));
        assert!(!is_valid_mobile_number("+1555-123-4567"));
        assert!(!is_valid_mobile_number("not a number"));
        assert!(!is_valid_mobile_number(""));
    }

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            username: "al".to_string(),
            password: "secret-password".to_string(),
            email: "a@x.com".to_string(),
            mobile_number: "+15551234567".to_string(),
            full_name: "Alice Example".to_string(),
        };
        assert!(validator::Validate::validate(&request).is_err());

        let request = RegisterRequest {
            username: "alice".to_string(),
            ..request
        };
        assert!(validator::Validate::validate(&request).is_ok());
    }

    #[test]
    fn test_otp_request_channel_field_renamed() {
        let request: OtpRequest =
            serde_json::from_str(r#"{"username": "alice", "type": "email"}"#).unwrap();
        assert_eq!(request.channel, "email");
    }
}
