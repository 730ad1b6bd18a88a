use std::sync::Arc;

use axum::{body::Body, http::Request};
use po_classifier_ai::ScriptedInvoker;
use po_classifier_server::{api::app_router, build_state_with_invoker, config::Config};
use tower::ServiceExt;

#[tokio::test]
async fn healthz_works() {
    let config = Config::from_env();
    let state = build_state_with_invoker(&config, Arc::new(ScriptedInvoker::default()));
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let config = Config::from_env();
    let state = build_state_with_invoker(&config, Arc::new(ScriptedInvoker::default()));
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
