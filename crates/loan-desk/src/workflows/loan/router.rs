use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ApplicationId, LoanDecisionInput, LoanType};
use super::questions::QuestionScript;
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{LoanApplicationRequest, LoanApplicationService, LoanServiceError};

/// Router builder exposing HTTP endpoints for intake, status, and quotes.
pub fn loan_router<R>(service: Arc<LoanApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/loan/applications", post(submit_handler::<R>))
        .route(
            "/api/v1/loan/applications/:application_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/loan/products/:slug/questions",
            get(questions_handler),
        )
        .route("/api/v1/loan/quote", post(quote_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    axum::Json(request): axum::Json<LoanApplicationRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.submit(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(LoanServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "application not found",
                "application_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn questions_handler(Path(slug): Path<String>) -> Response {
    let Some(loan_type) = LoanType::from_slug(&slug) else {
        let payload = json!({
            "error": format!("unknown loan product '{slug}'"),
        });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    let script = QuestionScript::for_loan(loan_type);
    let payload = json!({
        "loan_type": loan_type,
        "title": loan_type.title(),
        "intro_video": loan_type.intro_video(),
        "questions": script.questions,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn quote_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    axum::Json(input): axum::Json<LoanDecisionInput>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.quote(&input) {
        Ok(decision) => (StatusCode::OK, axum::Json(decision)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: LoanServiceError) -> Response {
    match error {
        LoanServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({
                "error": "application already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        LoanServiceError::Decision(decision) => {
            let payload = json!({
                "error": decision.to_string(),
                "field": decision.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        other if other.is_invalid_request() => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        other => {
            tracing::error!(error = %other, "loan request failed");
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
