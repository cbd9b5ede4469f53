//! Mocked purchase flow
//!
//! The caller's identity is always an explicit parameter resolved by the HTTP
//! layer from a validated token; nothing here reads ambient request state.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::auth::models::User;
use crate::domains::movies::models::Movie;
use crate::domains::purchases::models::{NewPurchase, Purchase, PurchaseStatus};
use crate::domains::purchases::types::{PaymentMethodInfo, PurchaseRequest, PurchaseResponse};
use crate::kernel::ServerDeps;

/// Flat catalog price until per-movie pricing exists
fn movie_price() -> Decimal {
    Decimal::new(999, 2)
}

/// Purchase a movie on behalf of `username`.
///
/// Requires both verification flags; a prior completed purchase of the same
/// movie is rejected. Payment is mocked: it always succeeds and yields a
/// generated transaction id.
pub async fn purchase_movie(
    username: &str,
    request: PurchaseRequest,
    deps: &ServerDeps,
) -> Result<PurchaseResponse, ApiError> {
    let user = User::find_by_username(username, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if !user.email_verified || !user.mobile_verified {
        return Err(ApiError::Payment(
            "Both email and mobile number must be verified to make purchases".to_string(),
        ));
    }

    let movie = Movie::find_by_id(request.movie_id, &deps.db_pool)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Movie not found with ID: {}", request.movie_id))
        })?;

    if Purchase::has_completed(user.id, movie.id, &deps.db_pool).await? {
        return Err(ApiError::Payment(
            "You have already purchased this movie".to_string(),
        ));
    }

    let transaction_id = process_payment(&request);

    let purchase = Purchase::create(
        &NewPurchase {
            user_id: user.id,
            movie_id: movie.id,
            amount: movie_price(),
            payment_method: request.payment_method,
            transaction_id,
            status: PurchaseStatus::Completed,
            completed_date: Some(Utc::now()),
        },
        &deps.db_pool,
    )
    .await?;

    Ok(PurchaseResponse {
        id: purchase.id,
        user_id: purchase.user_id,
        movie_id: purchase.movie_id,
        movie_title: movie.title,
        amount: purchase.amount,
        payment_method: purchase.payment_method,
        transaction_id: purchase.transaction_id,
        status: purchase.status,
        purchase_date: purchase.purchase_date,
        completed_date: purchase.completed_date,
    })
}

/// The caller's purchases, newest first
pub async fn list_purchases(
    username: &str,
    deps: &ServerDeps,
) -> Result<Vec<PurchaseResponse>, ApiError> {
    let user = User::find_by_username(username, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let records = Purchase::find_by_user(user.id, &deps.db_pool).await?;
    Ok(records.into_iter().map(Into::into).collect())
}

/// Available payment methods; a static list until a gateway provides them
pub fn payment_methods() -> Vec<PaymentMethodInfo> {
    vec![
        PaymentMethodInfo {
            code: "CREDIT_CARD".to_string(),
            name: "Credit Card".to_string(),
            description: "Pay with Visa, Mastercard, or American Express".to_string(),
            enabled: true,
        },
        PaymentMethodInfo {
            code: "DEBIT_CARD".to_string(),
            name: "Debit Card".to_string(),
            description: "Pay with your bank debit card".to_string(),
            enabled: true,
        },
        PaymentMethodInfo {
            code: "PAYPAL".to_string(),
            name: "PayPal".to_string(),
            description: "Pay with your PayPal account".to_string(),
            enabled: true,
        },
    ]
}

/// Mock payment processor: a real gateway integration would live here.
fn process_payment(request: &PurchaseRequest) -> String {
    info!("Processing payment with method: {:?}", request.payment_method);

    let transaction_id = Uuid::new_v4().to_string();
    info!("Payment processed successfully. Transaction ID: {}", transaction_id);

    transaction_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_price() {
        assert_eq!(movie_price().to_string(), "9.99");
    }

    #[test]
    fn test_payment_methods_all_enabled() {
        let methods = payment_methods();
        assert_eq!(methods.len(), 3);
        assert!(methods.iter().all(|m| m.enabled));
        assert!(methods.iter().any(|m| m.code == "PAYPAL"));
    }

    #[test]
    fn test_process_payment_yields_unique_transaction_ids() {
        let request = PurchaseRequest {
            movie_id: 1,
            payment_method: crate::domains::purchases::models::PaymentMethod::CreditCard,
            card_number: None,
            card_expiry: None,
            card_cvv: None,
            card_holder_name: None,
        };

        let a = process_payment(&request);
        let b = process_payment(&request);
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
