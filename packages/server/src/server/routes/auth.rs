use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::common::ApiError;
use crate::domains::auth::actions;
use crate::domains::auth::models::VerificationChannel;
use crate::domains::auth::types::{
    AuthResponse, LoginRequest, OtpRequest, RefreshTokenRequest, RegisterRequest, UserResponse,
    VerificationRequest,
};
use crate::server::app::AppState;
use crate::server::routes::validated;

pub async fn register_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let payload = validated(payload)?;
    let user = actions::register(payload, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let payload = validated(payload)?;
    let response = actions::login(payload, &state.deps).await?;
    Ok(Json(response))
}

pub async fn verify_email_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<VerificationRequest>,
) -> Result<Json<Value>, ApiError> {
    let payload = validated(payload)?;
    actions::verify_otp(
        &payload.username,
        &payload.code,
        VerificationChannel::Email,
        &state.deps,
    )
    .await?;
    Ok(Json(json!({ "message": "Email verified successfully" })))
}

pub async fn verify_mobile_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<VerificationRequest>,
) -> Result<Json<Value>, ApiError> {
    let payload = validated(payload)?;
    actions::verify_otp(
        &payload.username,
        &payload.code,
        VerificationChannel::Mobile,
        &state.deps,
    )
    .await?;
    Ok(Json(json!({ "message": "Mobile number verified successfully" })))
}

pub async fn resend_otp_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<OtpRequest>,
) -> Result<Json<Value>, ApiError> {
    let payload = validated(payload)?;
    let channel = VerificationChannel::parse(&payload.channel).ok_or_else(|| {
        ApiError::Validation("OTP type must be \"email\" or \"mobile\"".to_string())
    })?;

    actions::resend_otp(&payload.username, channel, &state.deps).await?;
    Ok(Json(json!({ "message": "Verification code sent" })))
}

pub async fn refresh_token_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<Value>, ApiError> {
    let payload = validated(payload)?;
    let token = actions::refresh_token(&payload.refresh_token, &state.deps).await?;
    Ok(Json(json!({ "token": token, "tokenType": "Bearer" })))
}

pub async fn logout_handler() -> Json<Value> {
    actions::logout();
    Json(json!({ "message": "Logged out successfully" }))
}
