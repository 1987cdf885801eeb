use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::commands::InterviewCommand;
use super::domain::InterviewId;
use super::gateway::{GatewayError, InterviewGateway};
use super::service::{InterviewActionService, InterviewServiceError};

/// Router builder exposing the interview-details view and command endpoint.
pub fn interview_router<G>(service: Arc<InterviewActionService<G>>) -> Router
where
    G: InterviewGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/interviews/:interview_id",
            get(details_handler::<G>),
        )
        .route(
            "/api/v1/interviews/:interview_id/commands",
            post(command_handler::<G>),
        )
        .with_state(service)
}

pub(crate) async fn details_handler<G>(
    State(service): State<Arc<InterviewActionService<G>>>,
    Path(interview_id): Path<String>,
) -> Response
where
    G: InterviewGateway + 'static,
{
    let id = InterviewId(interview_id);
    match service.details(&id) {
        Ok(details) => (StatusCode::OK, axum::Json(details)).into_response(),
        Err(error) => error_response(&id, error),
    }
}

pub(crate) async fn command_handler<G>(
    State(service): State<Arc<InterviewActionService<G>>>,
    Path(interview_id): Path<String>,
    axum::Json(command): axum::Json<InterviewCommand>,
) -> Response
where
    G: InterviewGateway + 'static,
{
    let id = InterviewId(interview_id);
    match service.execute(&id, command) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(&id, error),
    }
}

fn error_response(id: &InterviewId, error: InterviewServiceError) -> Response {
    let (status, payload) = match &error {
        InterviewServiceError::InvalidCommand(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": error.to_string() }),
        ),
        InterviewServiceError::Denied(denied) => (
            StatusCode::PRECONDITION_FAILED,
            json!({
                "error": error.to_string(),
                "command": denied.command.label(),
                "reason_code": denied.reason.code(),
                "reason": denied.reason.message(),
            }),
        ),
        InterviewServiceError::Busy(_) => (
            StatusCode::CONFLICT,
            json!({
                "interview_id": id.as_str(),
                "error": error.to_string(),
            }),
        ),
        InterviewServiceError::Withdrawn { operation, .. } => (
            StatusCode::GONE,
            json!({
                "interview_id": id.as_str(),
                "operation": operation.label(),
                "error": error.to_string(),
            }),
        ),
        InterviewServiceError::Gateway(GatewayError::NotFound) => (
            StatusCode::NOT_FOUND,
            json!({
                "interview_id": id.as_str(),
                "error": error.to_string(),
            }),
        ),
        InterviewServiceError::Gateway(_) => {
            (StatusCode::BAD_GATEWAY, json!({ "error": error.to_string() }))
        }
    };

    (status, axum::Json(payload)).into_response()
}
