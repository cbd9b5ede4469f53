//! Auth domain - accounts, verification codes, and JWT sessions
//!
//! Responsibilities:
//! - Registration with email/mobile verification codes
//! - Login gated on both verification flags
//! - Session/refresh token management

pub mod actions;
pub mod jwt;
pub mod models;
pub mod password;
pub mod types;

pub use jwt::{Claims, JwtService};
