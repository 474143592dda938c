use axum::extract::FromRef;

use crate::provider::SearchProvider;
use crate::result_store::ResultStore;
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedSearchProvider = Arc<dyn SearchProvider>;
pub type GuardedResultStore = Arc<dyn ResultStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub provider: GuardedSearchProvider,
    pub result_store: GuardedResultStore,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        provider: GuardedSearchProvider,
        result_store: GuardedResultStore,
    ) -> ServerState {
        ServerState {
            config,
            provider,
            result_store,
        }
    }
}

impl FromRef<ServerState> for GuardedSearchProvider {
    fn from_ref(input: &ServerState) -> Self {
        input.provider.clone()
    }
}

impl FromRef<ServerState> for GuardedResultStore {
    fn from_ref(input: &ServerState) -> Self {
        input.result_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
