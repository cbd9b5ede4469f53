//! Purchases domain wire types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domains::purchases::models::{PaymentMethod, PurchaseRecord, PurchaseStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub movie_id: i64,
    pub payment_method: PaymentMethod,

    // Card details are accepted for shape-compatibility with the client but
    // never stored; a real gateway integration would tokenize them.
    pub card_number: Option<String>,
    pub card_expiry: Option<String>,
    pub card_cvv: Option<String>,
    pub card_holder_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
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

impl From<PurchaseRecord> for PurchaseResponse {
    fn from(record: PurchaseRecord) -> Self {
        PurchaseResponse {
            id: record.id,
            user_id: record.user_id,
            movie_id: record.movie_id,
            movie_title: record.movie_title,
            amount: record.amount,
            payment_method: record.payment_method,
            transaction_id: record.transaction_id,
            status: record.status,
            purchase_date: record.purchase_date,
            completed_date: record.completed_date,
        }
    }
}

/// A payment method offered at checkout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodInfo {
    pub code: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
}
