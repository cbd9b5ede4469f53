//! Filtered catalog search

use crate::common::{ApiError, Page, PageParams};
use crate::domains::movies::models::Movie;
use crate::domains::movies::types::MovieSearchRequest;
use crate::kernel::ServerDeps;

pub async fn search_movies(
    request: MovieSearchRequest,
    deps: &ServerDeps,
) -> Result<Page<Movie>, ApiError> {
    let params = PageParams::new(request.page, request.size);
    let (movies, total) = Movie::search(&request, &params, &deps.db_pool).await?;
    Ok(Page::new(movies, &params, total))
}
