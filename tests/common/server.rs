//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own database and a stub HTTP
//! server standing in for the external search provider.

use mockito::ServerGuard;
use search_relay_server::provider::CustomSearchClient;
use search_relay_server::result_store::{ResultStore, SqliteResultStore, StoredRecord};
use search_relay_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Collection the test server stores results in.
pub const TEST_COLLECTION: &str = "results";

/// Path of the stubbed search endpoint on the provider stub.
pub const PROVIDER_PATH: &str = "/customsearch/v1";

/// Test server instance with isolated database and a stubbed search provider
///
/// When dropped, the server gracefully shuts down and temp resources are
/// cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The stub standing in for the external search provider.
    pub provider_stub: ServerGuard,

    /// Store handle for direct database access in tests.
    pub result_store: Arc<SqliteResultStore>,

    // Private fields - keep resources alive until drop
    _temp_db_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// This function:
    /// 1. Starts a stub HTTP server that plays the search provider
    /// 2. Creates a temporary results database
    /// 3. Binds the app to a random port (127.0.0.1:0)
    /// 4. Spawns the server in a background task
    pub async fn spawn() -> Self {
        let provider_stub = mockito::Server::new_async().await;

        let temp_db_dir = TempDir::new().expect("Failed to create temp db dir");
        let db_path = temp_db_dir.path().join("results.db");
        let result_store =
            Arc::new(SqliteResultStore::new(&db_path).expect("Failed to open results database"));

        let provider = Arc::new(CustomSearchClient::new(
            format!("{}{}", provider_stub.url(), PROVIDER_PATH),
            "test-api-key".to_string(),
            "test-engine-id".to_string(),
        ));

        let config = ServerConfig {
            port: 0, // the listener below picks the port
            collection: TEST_COLLECTION.to_string(),
            requests_logging_level: RequestsLoggingLevel::None,
        };

        let app = make_app(config, provider, result_store.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local addr")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Test server failed");
        });

        TestServer {
            base_url: format!("http://127.0.0.1:{}", port),
            provider_stub,
            result_store,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Records currently stored in the test collection.
    pub fn stored_records(&self) -> Vec<StoredRecord> {
        self.result_store
            .fetch_all(TEST_COLLECTION)
            .expect("Failed to fetch stored records")
    }
}
