use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Payment method, stored as a postgres enum column
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    ApplePay,
    GooglePay,
}

/// Purchase lifecycle state, stored as a postgres enum column
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "purchase_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// Purchase - SQL persistence layer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Purchase {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub status: PurchaseStatus,
    pub purchase_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
}

/// Purchase joined with the movie title for display
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PurchaseRecord {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub status: PurchaseStatus,
    pub purchase_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
}

/// Fields required to record a purchase
#[derive(Debug)]
pub struct NewPurchase {
    pub user_id: i64,
    pub movie_id: i64,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    pub status: PurchaseStatus,
    pub completed_date: Option<DateTime<Utc>>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Purchase {
    /// Record a purchase
    pub async fn create(new: &NewPurchase, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO purchases (
                user_id,
                movie_id,
                amount,
                payment_method,
                transaction_id,
                status,
                completed_date
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(new.user_id)
        .bind(new.movie_id)
        .bind(new.amount)
        .bind(new.payment_method)
        .bind(&new.transaction_id)
        .bind(new.status)
        .bind(new.completed_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// A user's purchases with movie titles, newest first
    pub async fn find_by_user(user_id: i64, pool: &PgPool) -> Result<Vec<PurchaseRecord>> {
        sqlx::query_as::<_, PurchaseRecord>(
            "SELECT p.*, m.title AS movie_title
             FROM purchases p
             JOIN movies m ON m.id = p.movie_id
             WHERE p.user_id = $1
             ORDER BY p.purchase_date DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Whether the user already holds a completed purchase of the movie
    pub async fn has_completed(user_id: i64, movie_id: i64, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM purchases
                WHERE user_id = $1 AND movie_id = $2 AND status = 'completed'
             )",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"CREDIT_CARD\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Paypal).unwrap(),
            "\"PAYPAL\""
        );
        let method: PaymentMethod = serde_json::from_str("\"APPLE_PAY\"").unwrap();
        assert_eq!(method, PaymentMethod::ApplePay);
    }

    #[test]
    fn test_purchase_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&PurchaseStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        let status: PurchaseStatus = serde_json::from_str("\"REFUNDED\"").unwrap();
        assert_eq!(status, PurchaseStatus::Refunded);
    }
}
