//! Account registration

use tracing::info;

use crate::common::ApiError;
use crate::domains::auth::actions::{send_email_otp, send_mobile_otp};
use crate::domains::auth::models::{NewUser, User};
use crate::domains::auth::password::hash_password;
use crate::domains::auth::types::{is_valid_mobile_number, RegisterRequest};
use crate::kernel::ServerDeps;

/// Register an account and issue verification codes for both channels.
///
/// Username, email, and mobile number are checked independently so each
/// collision produces its own message. The account starts with both
/// verification flags false and the default role.
pub async fn register(request: RegisterRequest, deps: &ServerDeps) -> Result<User, ApiError> {
    if !is_valid_mobile_number(&request.mobile_number) {
        return Err(ApiError::Validation(
            "Mobile number should be valid".to_string(),
        ));
    }

    if User::exists_by_username(&request.username, &deps.db_pool).await? {
        return Err(ApiError::AlreadyExists("Username is already taken".to_string()));
    }

    if User::exists_by_email(&request.email, &deps.db_pool).await? {
        return Err(ApiError::AlreadyExists("Email is already in use".to_string()));
    }

    if User::exists_by_mobile_number(&request.mobile_number, &deps.db_pool).await? {
        return Err(ApiError::AlreadyExists(
            "Mobile number is already in use".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;

    let user = User::create(
        &NewUser {
            username: request.username,
            email: request.email,
            mobile_number: request.mobile_number,
            password_hash,
            full_name: request.full_name,
        },
        &deps.db_pool,
    )
    .await?;

    info!("Registered user {} ({})", user.username, user.id);

    send_email_otp(&user, deps).await?;
    send_mobile_otp(&user, deps).await?;

    Ok(user)
}
