use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::common::{ApiError, Page};
use crate::domains::movies::actions;
use crate::domains::movies::models::Movie;
use crate::domains::movies::types::{MovieData, MovieSearchRequest};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::validated;

// Reads are public; mutations require an authenticated caller.

pub async fn list_movies_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    Ok(Json(actions::list_movies(&state.deps).await?))
}

pub async fn get_movie_handler(
    Path(id): Path<i64>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Movie>, ApiError> {
    Ok(Json(actions::get_movie(id, &state.deps).await?))
}

pub async fn search_movies_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<MovieSearchRequest>,
) -> Result<Json<Page<Movie>>, ApiError> {
    Ok(Json(actions::search_movies(payload, &state.deps).await?))
}

pub async fn create_movie_handler(
    _user: AuthUser,
    Extension(state): Extension<AppState>,
    Json(payload): Json<MovieData>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let payload = validated(payload)?;
    let movie = actions::create_movie(payload, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie_handler(
    _user: AuthUser,
    Path(id): Path<i64>,
    Extension(state): Extension<AppState>,
    Json(payload): Json<MovieData>,
) -> Result<Json<Movie>, ApiError> {
    let payload = validated(payload)?;
    Ok(Json(actions::update_movie(id, payload, &state.deps).await?))
}

pub async fn delete_movie_handler(
    _user: AuthUser,
    Path(id): Path<i64>,
    Extension(state): Extension<AppState>,
) -> Result<StatusCode, ApiError> {
    actions::delete_movie(id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
