use crate::error::{ServerError, ServerResult};
use crate::metrics::record_recommendation;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use coverage::{RecommendRequest, Recommendations};
use std::sync::Arc;

/// Rank (provider, model) pairs by stored coverage for a sector, region and
/// year window. Store failures and timeouts are returned as errors.
pub async fn recommend(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<RecommendRequest>,
) -> ServerResult<Json<Recommendations>> {
    match state.recommender.recommend(&request).await {
        Ok(recommendations) => {
            record_recommendation("ok");
            Ok(Json(recommendations))
        }
        Err(err) => {
            let err = ServerError::from(err);
            record_recommendation(err.error_code());
            Err(err)
        }
    }
}
