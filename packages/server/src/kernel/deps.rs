//! Server dependencies for workflow actions (using traits for testability)
//!
//! This module provides the central dependency container handed to all domain
//! actions. Outbound notification channels are trait objects so tests can
//! substitute recording fakes.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::kernel::notify::{Mailer, SmsSender};

/// Dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub mailer: Arc<dyn Mailer>,
    pub sms: Arc<dyn SmsSender>,
    pub jwt_service: Arc<JwtService>,
    /// Number of digits in a generated verification code
    pub otp_length: u32,
    /// Verification code lifetime in seconds
    pub otp_expiration_secs: i64,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        mailer: Arc<dyn Mailer>,
        sms: Arc<dyn SmsSender>,
        jwt_service: Arc<JwtService>,
        otp_length: u32,
        otp_expiration_secs: i64,
    ) -> Self {
        Self {
            db_pool,
            mailer,
            sms,
            jwt_service,
            otp_length,
            otp_expiration_secs,
        }
    }
}
