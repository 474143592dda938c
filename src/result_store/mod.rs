mod schema;
mod sqlite_result_store;

pub use sqlite_result_store::SqliteResultStore;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::provider::SearchItem;

/// A search result as persisted, with the store-generated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    #[serde(rename = "snippet")]
    pub description: String,
}

pub trait ResultStore: Send + Sync {
    /// Inserts one result into the named collection. Returns the generated id.
    fn insert(&self, collection: &str, item: &SearchItem) -> Result<String>;

    /// Returns every record in the named collection.
    fn fetch_all(&self, collection: &str) -> Result<Vec<StoredRecord>>;
}
