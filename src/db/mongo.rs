use std::time::Duration;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::info;

use crate::config::DatabaseConfig;

use super::model::*;
use super::repo::MovieRepo;

pub struct MongoRepository {
    collection: Collection<Document>,
    query_timeout: Duration,
}

impl MongoRepository {
    /// Connect to the store and select the configured database and
    /// collection. The client is pooled internally, so one repository is
    /// created at startup and shared across requests.
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(DbError::Connect)?;
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.connect_timeout());

        let client = Client::with_options(options).map_err(DbError::Connect)?;
        let db = client.database(&config.database);

        // Round-trip a ping so a bad address fails at startup instead of on
        // the first request.
        tokio::time::timeout(config.connect_timeout(), db.run_command(doc! { "ping": 1 }))
            .await
            .map_err(|_| DbError::ConnectTimeout)?
            .map_err(DbError::Connect)?;

        info!("Connected to database {}", config.database);

        Ok(Self {
            collection: db.collection(&config.collection),
            query_timeout: config.query_timeout(),
        })
    }

    async fn run_find(&self, filter: Document) -> DbResult<Vec<Movie>> {
        let mut cursor = self
            .collection
            .find(filter)
            .await
            .map_err(classify_find_error)?;

        let mut movies = Vec::new();
        while let Some(doc) = cursor.try_next().await.map_err(DbError::Stream)? {
            movies.push(bson::from_document(doc)?);
        }
        Ok(movies)
    }
}

#[async_trait]
impl MovieRepo for MongoRepository {
    async fn find_movies(&self, filter: &MovieFilter) -> DbResult<Vec<Movie>> {
        let filter = filter_document(filter);
        tokio::time::timeout(self.query_timeout, self.run_find(filter))
            .await
            .map_err(|_| DbError::QueryTimeout)?
    }
}

/// Build the store-side filter document. String conditions become
/// case-insensitive regexes with the needle escaped, so they match as literal
/// substrings; `year` is an exact match. An empty filter matches everything.
fn filter_document(filter: &MovieFilter) -> Document {
    let mut doc = Document::new();
    if let Some(title) = &filter.title {
        doc.insert("title", doc! { "$regex": regex::escape(title), "$options": "i" });
    }
    if let Some(genre) = &filter.genre {
        doc.insert("genre", doc! { "$regex": regex::escape(genre), "$options": "i" });
    }
    if let Some(year) = filter.year {
        doc.insert("year", year);
    }
    doc
}

/// A find that cannot start because the store is unreachable should surface
/// as a connection failure even though the client connects lazily.
fn classify_find_error(err: mongodb::error::Error) -> DbError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::Authentication { .. }
        | ErrorKind::DnsResolve { .. } => DbError::Connect(err),
        _ => DbError::Query(err),
    }
}
