use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    main_lib::AppState,
    models::{example_presets, ExamplePreset, TaxonomyRowDto},
};

#[derive(Debug, Default, Deserialize)]
pub(super) struct TaxonomyQuery {
    #[serde(default)]
    filter: Option<String>,
}

/// Taxonomy rows, optionally filtered by a case-insensitive search over all
/// three levels.
#[utoipa::path(
    get,
    path = "/api/v1/taxonomy",
    params(("filter" = Option<String>, Query, description = "Search text")),
    responses((status = 200, body = [TaxonomyRowDto]))
)]
pub(super) async fn list_taxonomy(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TaxonomyQuery>,
) -> Json<Vec<TaxonomyRowDto>> {
    let rows = state
        .classifier
        .taxonomy()
        .filter(query.filter.as_deref().unwrap_or_default())
        .into_iter()
        .map(TaxonomyRowDto::from)
        .collect();
    Json(rows)
}

#[utoipa::path(get, path = "/api/v1/examples", responses((status = 200, body = [ExamplePreset])))]
pub(super) async fn list_examples() -> Json<Vec<ExamplePreset>> {
    Json(example_presets())
}

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/taxonomy", get(list_taxonomy))
        .route("/examples", get(list_examples))
}
