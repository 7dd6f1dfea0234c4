use serde::{Deserialize, Serialize};

/// A catalog record. Records are written to the store out of band, so every
/// field may be absent; absent fields stay absent in the JSON encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

/// Conjunction of field-level conditions. `title` and `genre` match as
/// case-insensitive substrings, `year` matches exactly; `None` fields do not
/// constrain the result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect: {0}")]
    Connect(#[source] mongodb::error::Error),
    #[error("Timed out connecting to the database")]
    ConnectTimeout,
    #[error("Query failed to start: {0}")]
    Query(#[source] mongodb::error::Error),
    #[error("Result stream failed: {0}")]
    Stream(#[source] mongodb::error::Error),
    #[error("Failed to decode record: {0}")]
    Decode(#[from] mongodb::bson::de::Error),
    #[error("Query timed out")]
    QueryTimeout,
}

impl DbError {
    /// Whether the failure is about reaching the store at all, as opposed to
    /// a query that the store accepted and then failed.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::Connect(_) | DbError::ConnectTimeout)
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let movie = Movie {
            id: None,
            title: Some("Alien".to_string()),
            year: Some(1979),
            genre: None,
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Alien", "year": 1979 }));
    }

    #[test]
    fn full_record_round_trips_through_json() {
        let movie = Movie {
            id: Some("abc123".to_string()),
            title: Some("Alien".to_string()),
            year: Some(1979),
            genre: Some("Horror".to_string()),
        };
        let json = serde_json::to_string(&movie).unwrap();
        assert_eq!(
            json,
            r#"{"_id":"abc123","title":"Alien","year":1979,"genre":"Horror"}"#
        );
        let back: Movie = serde_json::from_str(&json).unwrap();
        assert_eq!(back, movie);
    }

    #[test]
    fn decodes_from_bson_document() {
        let doc = doc! { "_id": "abc123", "title": "Alien", "year": 1979, "genre": "Horror" };
        let movie: Movie = bson::from_document(doc).unwrap();
        assert_eq!(movie.id.as_deref(), Some("abc123"));
        assert_eq!(movie.year, Some(1979));
    }

    #[test]
    fn decodes_sparse_bson_document() {
        let doc = doc! { "title": "Stalker" };
        let movie: Movie = bson::from_document(doc).unwrap();
        assert_eq!(movie.title.as_deref(), Some("Stalker"));
        assert_eq!(movie.id, None);
        assert_eq!(movie.year, None);
        assert_eq!(movie.genre, None);
    }

    #[test]
    fn mistyped_year_fails_to_decode() {
        let doc = doc! { "title": "Alien", "year": "nineteen79" };
        assert!(bson::from_document::<Movie>(doc).is_err());
    }
}
