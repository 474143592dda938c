//! The query pipeline: search upstream, persist each result, return them all.

use tracing::{debug, error};

use crate::provider::{ProviderError, SearchItem, SearchProvider};
use crate::result_store::ResultStore;

/// Runs one search and persists every returned item, best-effort.
///
/// Items are inserted in provider order. Each insert is independent: a failed
/// insert is logged and skipped, and never removes the item from the returned
/// sequence. The batch is not atomic - earlier inserts stay in place when a
/// later one fails.
pub async fn search_and_store(
    provider: &dyn SearchProvider,
    store: &dyn ResultStore,
    collection: &str,
    query: &str,
) -> Result<Vec<SearchItem>, ProviderError> {
    let items = provider.search(query).await?;

    for item in &items {
        match store.insert(collection, item) {
            Ok(id) => debug!("Stored search result {} ({})", id, item.link),
            Err(err) => error!("Failed to store search result {}: {}", item.link, err),
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result_store::StoredRecord;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubProvider {
        items: Vec<SearchItem>,
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        async fn search(&self, _query: &str) -> Result<Vec<SearchItem>, ProviderError> {
            Ok(self.items.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl SearchProvider for FailingProvider {
        async fn search(&self, _query: &str) -> Result<Vec<SearchItem>, ProviderError> {
            Err(ProviderError::UpstreamStatus(
                reqwest::StatusCode::FORBIDDEN,
            ))
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        inserted: Mutex<Vec<SearchItem>>,
    }

    impl ResultStore for RecordingStore {
        fn insert(&self, _collection: &str, item: &SearchItem) -> Result<String> {
            let mut inserted = self.inserted.lock().unwrap();
            inserted.push(item.clone());
            Ok(format!("record-{}", inserted.len()))
        }

        fn fetch_all(&self, _collection: &str) -> Result<Vec<StoredRecord>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct FailingStore {
        attempts: AtomicUsize,
    }

    impl ResultStore for FailingStore {
        fn insert(&self, _collection: &str, _item: &SearchItem) -> Result<String> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("disk full")
        }

        fn fetch_all(&self, _collection: &str) -> Result<Vec<StoredRecord>> {
            Ok(Vec::new())
        }
    }

    fn item(n: usize) -> SearchItem {
        SearchItem {
            title: format!("title {}", n),
            link: format!("https://example.com/{}", n),
            description: format!("snippet {}", n),
        }
    }

    #[tokio::test]
    async fn stores_every_item_in_provider_order() {
        let provider = StubProvider {
            items: vec![item(1), item(2), item(3)],
        };
        let store = RecordingStore::default();

        let items = search_and_store(&provider, &store, "results", "anything")
            .await
            .unwrap();

        assert_eq!(items, vec![item(1), item(2), item(3)]);
        assert_eq!(*store.inserted.lock().unwrap(), items);
    }

    #[tokio::test]
    async fn insert_failures_do_not_remove_items_from_the_response() {
        let provider = StubProvider {
            items: vec![item(1), item(2), item(3)],
        };
        let store = FailingStore::default();

        let items = search_and_store(&provider, &store, "results", "anything")
            .await
            .unwrap();

        // Every insert was attempted and failed, yet the caller still gets
        // the full sequence.
        assert_eq!(items.len(), 3);
        assert_eq!(store.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn provider_failure_attempts_no_inserts() {
        let store = RecordingStore::default();

        let result = search_and_store(&FailingProvider, &store, "results", "anything").await;

        assert!(result.is_err());
        assert!(store.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_result_set_is_returned_as_is() {
        let provider = StubProvider { items: Vec::new() };
        let store = RecordingStore::default();

        let items = search_and_store(&provider, &store, "results", "anything")
            .await
            .unwrap();

        assert!(items.is_empty());
        assert!(store.inserted.lock().unwrap().is_empty());
    }
}
