use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use matcher::{MatchResult, YearRange};
use query::{parse_query, Query};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `/api/v1/match` and `/api/v1/parse`
#[derive(Debug, Deserialize, Serialize)]
pub struct QueryRequest {
    /// Free-text request, e.g. `"ssp2 gdp|ppp india 2020 2050 annual"`
    pub query: String,
}

/// Catalog listing entry
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
    pub years: YearRange,
}

/// Catalog listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub count: usize,
    pub providers: Vec<CatalogEntry>,
}

/// Rank catalog providers against a free-text query. A query with no
/// recognizable terms yields an empty provider list, not an error.
///
/// Scoring is CPU-bound, so it runs on the blocking pool instead of the
/// async workers.
pub async fn match_providers(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<QueryRequest>,
) -> ServerResult<Json<MatchResult>> {
    let matcher = Arc::clone(&state.matcher);
    let result = tokio::task::spawn_blocking(move || matcher.match_query(&request.query)).await?;

    tracing::debug!(
        hits = result.providers.len(),
        best = result.best().map(|p| p.provider_id.as_str()).unwrap_or("-"),
        "match request served"
    );
    Ok(Json(result))
}

/// Return the structured form of a query without scoring it.
pub async fn parse(Json(request): Json<QueryRequest>) -> Json<Query> {
    Json(parse_query(&request.query))
}

/// List the loaded catalog.
pub async fn list_catalog(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let providers: Vec<CatalogEntry> = state
        .matcher
        .catalog()
        .iter()
        .map(|p| CatalogEntry {
            id: p.id.clone(),
            name: p.name.clone(),
            granularity: p.granularity.clone(),
            years: p.years,
        })
        .collect();

    Json(CatalogResponse {
        count: providers.len(),
        providers,
    })
}
