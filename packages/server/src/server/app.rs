//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::Extension;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::kernel::{LogSmsSender, ServerDeps, SmtpMailer};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    create_movie_handler, delete_movie_handler, get_movie_handler, health_handler,
    list_movies_handler, list_purchases_handler, login_handler, logout_handler,
    payment_methods_handler, purchase_movie_handler, refresh_token_handler, register_handler,
    resend_otp_handler, search_movies_handler, update_movie_handler, verify_email_handler,
    verify_mobile_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, config: &Config) -> Result<Router> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_expiration_secs,
        config.jwt_refresh_expiration_secs,
    ));

    let mailer = Arc::new(
        SmtpMailer::new(
            &config.smtp_host,
            &config.smtp_username,
            &config.smtp_password,
            &config.mail_from,
        )
        .context("Failed to build SMTP mailer")?,
    );

    let deps = Arc::new(ServerDeps::new(
        pool.clone(),
        mailer,
        Arc::new(LogSmsSender),
        jwt_service.clone(),
        config.otp_length,
        config.otp_expiration_secs,
    ));

    let app_state = AppState {
        db_pool: pool,
        deps,
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = jwt_service.clone();

    let app = Router::new()
        .route("/health", get(health_handler))
        // Auth
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/verify-email", post(verify_email_handler))
        .route("/api/auth/verify-mobile", post(verify_mobile_handler))
        .route("/api/auth/resend-otp", post(resend_otp_handler))
        .route("/api/auth/refresh-token", post(refresh_token_handler))
        .route("/api/auth/logout", post(logout_handler))
        // Movies
        .route(
            "/api/movies",
            get(list_movies_handler).post(create_movie_handler),
        )
        .route("/api/movies/search", post(search_movies_handler))
        .route(
            "/api/movies/:id",
            get(get_movie_handler)
                .put(update_movie_handler)
                .delete(delete_movie_handler),
        )
        // Purchases
        .route(
            "/api/purchases",
            get(list_purchases_handler).post(purchase_movie_handler),
        )
        .route(
            "/api/purchases/payment-methods",
            get(payment_methods_handler),
        )
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
