use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use po_classifier_ai::provider_catalog;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    main_lib::AppState,
    models::{
        ClassificationStatus, ClassifyRequest, ClassifyResponse, ExamplePreset, HistoryEntryDto,
        InputStatsDto, ModelInfoDto, ProviderInfoDto, TaxonomyRowDto,
    },
};

mod classify;
mod history;
mod taxonomy;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/model", responses((status = 200, body = ModelInfoDto)))]
async fn model_info(State(state): State<Arc<AppState>>) -> Json<ModelInfoDto> {
    Json(state.classifier.model_info().into())
}

/// Providers the server can be configured with.
#[utoipa::path(
    get,
    path = "/api/v1/providers",
    responses((status = 200, body = [ProviderInfoDto]))
)]
async fn list_providers(State(state): State<Arc<AppState>>) -> Json<Vec<ProviderInfoDto>> {
    let active = state.classifier.model_info().provider;
    Json(
        provider_catalog()
            .into_iter()
            .map(|p| ProviderInfoDto::new(p, &active))
            .collect(),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        model_info,
        list_providers,
        classify::classify,
        classify::last_classification,
        taxonomy::list_taxonomy,
        taxonomy::list_examples,
        history::list_history,
        history::clear_history,
    ),
    components(schemas(
        ClassifyRequest,
        ClassifyResponse,
        ClassificationStatus,
        InputStatsDto,
        ModelInfoDto,
        ProviderInfoDto,
        TaxonomyRowDto,
        HistoryEntryDto,
        ExamplePreset,
    )),
    tags((name = "po-classifier"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/model", get(model_info))
        .route("/providers", get(list_providers))
        .merge(classify::router())
        .merge(taxonomy::router())
        .merge(history::router());

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
