pub mod purchase;

pub use purchase::{NewPurchase, PaymentMethod, Purchase, PurchaseRecord, PurchaseStatus};
