use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ClassifyRequest, ClassifyResponse},
};

/// Classify a PO description. A malformed model response is still a 200 with
/// `status: "malformed"` and the raw text.
#[utoipa::path(
    post,
    path = "/api/v1/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, body = ClassifyResponse),
        (status = 400, description = "Blank description"),
        (status = 502, description = "Model backend failed"),
        (status = 504, description = "Model backend timed out"),
    )
)]
pub(super) async fn classify(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClassifyRequest>,
) -> ApiResult<Json<ClassifyResponse>> {
    debug!("Classifying PO ({} chars)...", body.description.len());
    let classification = state
        .classifier
        .classify(&body.description, body.supplier.as_deref())
        .await?;
    let response = ClassifyResponse::from(&classification);
    state.record(classification)?;
    Ok(Json(response))
}

/// The most recent classification, or 204 if none has run yet.
#[utoipa::path(
    get,
    path = "/api/v1/classify/last",
    responses((status = 200, body = ClassifyResponse), (status = 204))
)]
pub(super) async fn last_classification(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    Ok(match state.last_classification()? {
        Some(classification) => Json(ClassifyResponse::from(&classification)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/classify", post(classify))
        .route("/classify/last", get(last_classification))
}
