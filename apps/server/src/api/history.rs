use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::debug;

use crate::{error::ApiResult, main_lib::AppState, models::HistoryEntryDto};

/// Recent classifications, newest first.
#[utoipa::path(get, path = "/api/v1/history", responses((status = 200, body = [HistoryEntryDto])))]
pub(super) async fn list_history(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HistoryEntryDto>>> {
    let entries = state.history_entries()?;
    Ok(Json(entries.iter().map(HistoryEntryDto::from).collect()))
}

#[utoipa::path(delete, path = "/api/v1/history", responses((status = 204)))]
pub(super) async fn clear_history(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    debug!("Clearing classification history...");
    state.clear_history()?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/history", get(list_history).delete(clear_history))
}
