use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub jwt_expiration_secs: i64,
    /// Refresh token lifetime in seconds
    pub jwt_refresh_expiration_secs: i64,
    /// Number of digits in a verification code
    pub otp_length: u32,
    /// Verification code lifetime in seconds
    pub otp_expiration_secs: i64,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub mail_from: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET")
                .context("JWT_SECRET must be set")?,
            jwt_expiration_secs: env::var("JWT_EXPIRATION_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("JWT_EXPIRATION_SECS must be a valid number")?,
            jwt_refresh_expiration_secs: env::var("JWT_REFRESH_EXPIRATION_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("JWT_REFRESH_EXPIRATION_SECS must be a valid number")?,
            otp_length: env::var("OTP_LENGTH")
                .unwrap_or_else(|_| "6".to_string())
                .parse()
                .context("OTP_LENGTH must be a valid number")?,
            otp_expiration_secs: env::var("OTP_EXPIRATION_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .context("OTP_EXPIRATION_SECS must be a valid number")?,
            smtp_host: env::var("SMTP_HOST")
                .context("SMTP_HOST must be set")?,
            smtp_username: env::var("SMTP_USERNAME")
                .context("SMTP_USERNAME must be set")?,
            smtp_password: env::var("SMTP_PASSWORD")
                .context("SMTP_PASSWORD must be set")?,
            mail_from: env::var("MAIL_FROM")
                .context("MAIL_FROM must be set")?,
        })
    }
}
