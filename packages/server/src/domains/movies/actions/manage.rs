//! Catalog CRUD

use tracing::info;

use crate::common::ApiError;
use crate::domains::movies::models::Movie;
use crate::domains::movies::types::MovieData;
use crate::kernel::ServerDeps;

pub async fn create_movie(data: MovieData, deps: &ServerDeps) -> Result<Movie, ApiError> {
    let movie = Movie::insert(&data, &deps.db_pool).await?;
    info!("Created movie {} ({})", movie.title, movie.id);
    Ok(movie)
}

pub async fn get_movie(id: i64, deps: &ServerDeps) -> Result<Movie, ApiError> {
    Movie::find_by_id(id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Movie not found with ID: {}", id)))
}

pub async fn list_movies(deps: &ServerDeps) -> Result<Vec<Movie>, ApiError> {
    Ok(Movie::find_all(&deps.db_pool).await?)
}

pub async fn update_movie(id: i64, data: MovieData, deps: &ServerDeps) -> Result<Movie, ApiError> {
    Movie::update(id, &data, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Movie not found with ID: {}", id)))
}

pub async fn delete_movie(id: i64, deps: &ServerDeps) -> Result<(), ApiError> {
    let deleted = Movie::delete(id, &deps.db_pool).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Movie not found with ID: {}", id)));
    }
    Ok(())
}
