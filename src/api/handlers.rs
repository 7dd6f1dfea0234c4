use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::db::{Movie, MovieFilter};
use crate::server::AppState;

use super::error::ApiError;

/// Raw query parameters for `GET /movies`. `year` stays a string here so a
/// non-numeric value can be rejected with the fixed 400 body instead of an
/// extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct MovieQuery {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
}

impl MovieQuery {
    fn into_filter(self) -> Result<MovieFilter, ApiError> {
        let year = match self.year.as_deref() {
            None | Some("") => None,
            Some(s) => Some(s.parse::<i32>().map_err(|_| ApiError::InvalidYear)?),
        };

        Ok(MovieFilter {
            title: self.title.filter(|t| !t.is_empty()),
            genre: self.genre.filter(|g| !g.is_empty()),
            year,
        })
    }
}

pub async fn get_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let filter = params.into_filter()?;
    let movies = state.db.find_movies(&filter).await?;
    Ok(Json(movies))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
