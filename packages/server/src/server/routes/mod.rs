// HTTP routes
pub mod auth;
pub mod health;
pub mod movies;
pub mod purchases;

pub use auth::*;
pub use health::*;
pub use movies::*;
pub use purchases::*;

use validator::Validate;

use crate::common::ApiError;

/// Run derive-based validation on a request payload, mapping failures to 400
pub(crate) fn validated<T: Validate>(payload: T) -> Result<T, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(payload)
}
