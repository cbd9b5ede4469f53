//! Movies domain - catalog CRUD and filtered search

pub mod actions;
pub mod models;
pub mod types;
