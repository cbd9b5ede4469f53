// Movie Catalog - API Core
//
// This crate provides the backend API for a movie catalog: account
// registration with email/mobile verification, JWT sessions, movie CRUD
// and search, and a mocked purchase flow.
//
// SQL queries live in domains/*/models, workflow logic in domains/*/actions.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
