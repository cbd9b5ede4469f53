use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;

use crate::common::ApiError;
use crate::domains::purchases::actions;
use crate::domains::purchases::types::{PaymentMethodInfo, PurchaseRequest, PurchaseResponse};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

// Every purchase route requires an authenticated caller; the username from
// the validated token is passed to the action explicitly.

pub async fn purchase_movie_handler(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Json(payload): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseResponse>), ApiError> {
    let response = actions::purchase_movie(&user.username, payload, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_purchases_handler(
    user: AuthUser,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<PurchaseResponse>>, ApiError> {
    Ok(Json(
        actions::list_purchases(&user.username, &state.deps).await?,
    ))
}

pub async fn payment_methods_handler(_user: AuthUser) -> Json<Vec<PaymentMethodInfo>> {
    Json(actions::payment_methods())
}
