use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::common::PageParams;
use crate::domains::movies::types::{MovieData, MovieSearchRequest};

/// Movie - SQL persistence layer
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub genres: Vec<String>,
    pub release_date: Option<NaiveDate>,
    pub duration_minutes: Option<i32>,
    pub rating: f64,
    pub plot: Option<String>,
    pub featured: bool,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Movie {
    /// Find movie by ID
    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Check if a movie exists
    pub async fn exists(id: i64, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// All movies, title order
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM movies ORDER BY title")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new movie
    pub async fn insert(data: &MovieData, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO movies (
                title,
                director,
                genres,
                release_date,
                duration_minutes,
                rating,
                plot,
                featured
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.director)
        .bind(&data.genres)
        .bind(data.release_date)
        .bind(data.duration_minutes)
        .bind(data.rating)
        .bind(&data.plot)
        .bind(data.featured)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Replace a movie's fields; returns None if the id does not exist
    pub async fn update(id: i64, data: &MovieData, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE movies SET
                title = $2,
                director = $3,
                genres = $4,
                release_date = $5,
                duration_minutes = $6,
                rating = $7,
                plot = $8,
                featured = $9
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.director)
        .bind(&data.genres)
        .bind(data.release_date)
        .bind(data.duration_minutes)
        .bind(data.rating)
        .bind(&data.plot)
        .bind(data.featured)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a movie; returns whether a row was removed
    pub async fn delete(id: i64, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Filtered search: one page of matches plus the overall match count.
    pub async fn search(
        request: &MovieSearchRequest,
        params: &PageParams,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM movies WHERE true");
        push_filters(&mut count_builder, request);
        let total: i64 = count_builder.build_query_scalar().fetch_one(pool).await?;

        let mut builder = QueryBuilder::new("SELECT * FROM movies WHERE true");
        push_filters(&mut builder, request);
        builder.push(" ORDER BY ");
        builder.push(sort_column(&request.sort_by));
        builder.push(if request.ascending { " ASC" } else { " DESC" });
        builder.push(" LIMIT ");
        builder.push_bind(params.size);
        builder.push(" OFFSET ");
        builder.push_bind(params.offset());

        let movies = builder.build_query_as::<Self>().fetch_all(pool).await?;
        Ok((movies, total))
    }
}

/// Append the present filters as AND-ed predicates.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, request: &MovieSearchRequest) {
    if let Some(title) = &request.title {
        builder.push(" AND title ILIKE ");
        builder.push_bind(format!("%{}%", title));
    }

    if let Some(director) = &request.director {
        builder.push(" AND director ILIKE ");
        builder.push_bind(format!("%{}%", director));
    }

    if let Some(genre) = &request.genre {
        builder.push(" AND EXISTS (SELECT 1 FROM unnest(genres) AS g WHERE g ILIKE ");
        builder.push_bind(format!("%{}%", genre));
        builder.push(")");
    }

    if let Some(start) = request.release_date_start {
        builder.push(" AND release_date >= ");
        builder.push_bind(start);
    }

    if let Some(end) = request.release_date_end {
        builder.push(" AND release_date <= ");
        builder.push_bind(end);
    }

    if let Some(min_rating) = request.min_rating {
        builder.push(" AND rating >= ");
        builder.push_bind(min_rating);
    }

    if let Some(featured) = request.featured {
        builder.push(" AND featured = ");
        builder.push_bind(featured);
    }
}

/// Whitelisted sort columns; anything unknown falls back to title so a
/// caller-supplied value never reaches the SQL text.
fn sort_column(requested: &str) -> &'static str {
    match requested {
        "title" => "title",
        "director" => "director",
        "releaseDate" | "release_date" => "release_date",
        "durationMinutes" | "duration_minutes" => "duration_minutes",
        "rating" => "rating",
        _ => "title",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_whitelist() {
        assert_eq!(sort_column("rating"), "rating");
        assert_eq!(sort_column("releaseDate"), "release_date");
        assert_eq!(sort_column("title"), "title");
        // Unknown or hostile input never reaches the SQL text
        assert_eq!(sort_column("id; DROP TABLE movies"), "title");
        assert_eq!(sort_column(""), "title");
    }

    #[test]
    fn test_push_filters_all_present() {
        let request = MovieSearchRequest {
            title: Some("heat".to_string()),
            director: Some("mann".to_string()),
            genre: Some("crime".to_string()),
            release_date_start: Some(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()),
            release_date_end: Some(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()),
            min_rating: Some(7.0),
            featured: Some(true),
            ..Default::default()
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM movies WHERE true");
        push_filters(&mut builder, &request);
        let sql = builder.into_sql();

        assert!(sql.contains("title ILIKE $1"));
        assert!(sql.contains("director ILIKE $2"));
        assert!(sql.contains("unnest(genres)"));
        assert!(sql.contains("release_date >= $4"));
        assert!(sql.contains("release_date <= $5"));
        assert!(sql.contains("rating >= $6"));
        assert!(sql.contains("featured = $7"));
    }

    #[test]
    fn test_push_filters_none_present() {
        let request = MovieSearchRequest::default();

        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM movies WHERE true");
        push_filters(&mut builder, &request);
        let sql = builder.into_sql();

        assert_eq!(sql, "SELECT * FROM movies WHERE true");
    }
}
