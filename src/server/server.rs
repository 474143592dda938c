use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::pipeline::search_and_store;
use crate::provider::SearchProvider;
use crate::result_store::ResultStore;

use super::state::ServerState;
use super::{log_requests, ServerConfig};

/// Deadline on the listing fetch. The search pipeline deliberately has none.
const LIST_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize, Debug)]
struct SearchParams {
    query: Option<String>,
}

async fn search(State(state): State<ServerState>, Query(params): Query<SearchParams>) -> Response {
    let query = match params.query.as_deref() {
        Some(query) if !query.is_empty() => query,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                "Query param 'query' is required".to_string(),
            )
                .into_response()
        }
    };

    match search_and_store(
        state.provider.as_ref(),
        state.result_store.as_ref(),
        &state.config.collection,
        query,
    )
    .await
    {
        Ok(items) => Json(items).into_response(),
        Err(err) => {
            error!("Search for {:?} failed: {}", query, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error executing search: {}", err),
            )
                .into_response()
        }
    }
}

async fn get_all_lists(State(state): State<ServerState>) -> Response {
    let store = state.result_store.clone();
    let collection = state.config.collection.clone();

    let fetch = tokio::task::spawn_blocking(move || store.fetch_all(&collection));

    let records = match tokio::time::timeout(LIST_FETCH_TIMEOUT, fetch).await {
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Timed out listing documents after {}s",
                    LIST_FETCH_TIMEOUT.as_secs()
                ),
            )
                .into_response()
        }
        Ok(Err(err)) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error listing documents: {}", err),
            )
                .into_response()
        }
        Ok(Ok(Err(err))) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error listing documents: {}", err),
            )
                .into_response()
        }
        Ok(Ok(Ok(records))) => records,
    };

    Json(records).into_response()
}

pub fn make_app(
    config: ServerConfig,
    provider: Arc<dyn SearchProvider>,
    result_store: Arc<dyn ResultStore>,
) -> Router {
    let state = ServerState::new(config, provider, result_store);

    Router::new()
        .route("/search", get(search))
        .route("/lists", get(get_all_lists))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

pub async fn run_server(
    config: ServerConfig,
    provider: Arc<dyn SearchProvider>,
    result_store: Arc<dyn ResultStore>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, provider, result_store);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
