pub mod purchase_movie;

pub use purchase_movie::{list_purchases, payment_methods, purchase_movie};
