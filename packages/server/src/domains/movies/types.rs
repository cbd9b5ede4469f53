//! Movies domain wire types

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

/// Movie payload for create and update
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieData {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Director is required"))]
    pub director: String,

    #[serde(default)]
    pub genres: Vec<String>,

    pub release_date: Option<NaiveDate>,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: Option<i32>,

    #[validate(range(exclusive_min = 0.0, message = "Rating must be positive"))]
    pub rating: f64,

    pub plot: Option<String>,

    #[serde(default)]
    pub featured: bool,
}

/// Search filters; absent fields do not constrain the result.
/// Filters combine with logical AND.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieSearchRequest {
    pub title: Option<String>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub release_date_start: Option<NaiveDate>,
    pub release_date_end: Option<NaiveDate>,
    pub min_rating: Option<f64>,
    pub featured: Option<bool>,
    pub page: i64,
    pub size: i64,
    pub sort_by: String,
    pub ascending: bool,
}

impl Default for MovieSearchRequest {
    fn default() -> Self {
        MovieSearchRequest {
            title: None,
            director: None,
            genre: None,
            release_date_start: None,
            release_date_end: None,
            min_rating: None,
            featured: None,
            page: 0,
            size: 10,
            sort_by: "title".to_string(),
            ascending: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let request: MovieSearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 10);
        assert_eq!(request.sort_by, "title");
        assert!(request.ascending);
        assert!(request.title.is_none());
    }

    #[test]
    fn test_movie_data_rejects_zero_rating() {
        let data = MovieData {
            title: "Heat".to_string(),
            director: "Michael Mann".to_string(),
            genres: vec!["crime".to_string()],
            release_date: None,
            duration_minutes: Some(170),
            rating: 0.0,
            plot: None,
            featured: false,
        };
        assert!(validator::Validate::validate(&data).is_err());

        let data = MovieData { rating: 8.3, ..data };
        assert!(validator::Validate::validate(&data).is_ok());
    }
}
