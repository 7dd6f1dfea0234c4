use async_trait::async_trait;

use super::model::*;

#[async_trait]
pub trait MovieRepo: Send + Sync {
    /// Run a filtered find against the store and drain the results in store
    /// iteration order. No sort is applied.
    async fn find_movies(&self, filter: &MovieFilter) -> DbResult<Vec<Movie>>;
}
