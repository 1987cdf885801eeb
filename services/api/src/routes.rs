use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use hireflow::error::AppError;
use hireflow::workflows::interviews::{
    interview_router, normalize_record, InterviewActionService, InterviewDetails,
    InterviewGateway, RawInterviewRecord,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_interview_routes<G>(service: Arc<InterviewActionService<G>>) -> axum::Router
where
    G: InterviewGateway + 'static,
{
    interview_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/eligibility",
            axum::routing::post(eligibility_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Derive the details view for a record supplied by the caller, without a gateway.
pub(crate) async fn eligibility_endpoint(
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<InterviewDetails>, AppError> {
    let raw: RawInterviewRecord = serde_json::from_value(payload)?;
    Ok(Json(InterviewDetails::from_record(normalize_record(raw))))
}
