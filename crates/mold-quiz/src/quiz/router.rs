use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Answer, SessionId};
use super::repository::{ContactNotifier, NotifyError, RepositoryError, SessionRepository};
use super::service::{QuizServiceError, QuizSessionService};
use super::wizard::WizardError;

/// Router builder exposing HTTP endpoints for the assessment flow.
pub fn quiz_router<R, N>(service: Arc<QuizSessionService<R, N>>) -> Router
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    Router::new()
        .route("/api/v1/quiz/questions", get(questions_handler::<R, N>))
        .route("/api/v1/quiz/sessions", post(create_handler::<R, N>))
        .route(
            "/api/v1/quiz/sessions/:session_id",
            get(status_handler::<R, N>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/answers",
            post(answer_handler::<R, N>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/toggle",
            post(toggle_handler::<R, N>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/advance",
            post(advance_handler::<R, N>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/back",
            post(back_handler::<R, N>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/contact",
            post(contact_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerRequest {
    pub(crate) question_id: String,
    pub(crate) answer: Answer,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToggleRequest {
    pub(crate) question_id: String,
    pub(crate) value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactRequest {
    pub(crate) email: String,
    pub(crate) name: String,
}

pub(crate) async fn questions_handler<R, N>(
    State(service): State<Arc<QuizSessionService<R, N>>>,
) -> Response
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    (
        StatusCode::OK,
        axum::Json(service.bank().questions().to_vec()),
    )
        .into_response()
}

pub(crate) async fn create_handler<R, N>(
    State(service): State<Arc<QuizSessionService<R, N>>>,
) -> Response
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    match service.create() {
        Ok(record) => {
            let view = record.status_view(service.bank());
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<QuizSessionService<R, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    let id = SessionId(session_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view(service.bank());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answer_handler<R, N>(
    State(service): State<Arc<QuizSessionService<R, N>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<AnswerRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    let id = SessionId(session_id);
    match service.record_answer(&id, &request.question_id, request.answer) {
        Ok(record) => {
            let view = record.status_view(service.bank());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn toggle_handler<R, N>(
    State(service): State<Arc<QuizSessionService<R, N>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<ToggleRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    let id = SessionId(session_id);
    match service.toggle(&id, &request.question_id, &request.value) {
        Ok(record) => {
            let view = record.status_view(service.bank());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn advance_handler<R, N>(
    State(service): State<Arc<QuizSessionService<R, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    let id = SessionId(session_id);
    match service.advance(&id) {
        Ok(record) => {
            let view = record.status_view(service.bank());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn back_handler<R, N>(
    State(service): State<Arc<QuizSessionService<R, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    let id = SessionId(session_id);
    match service.back(&id) {
        Ok(record) => {
            let view = record.status_view(service.bank());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn contact_handler<R, N>(
    State(service): State<Arc<QuizSessionService<R, N>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<ContactRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    let id = SessionId(session_id);
    match service.submit_contact(&id, &request.email, &request.name) {
        Ok((record, _)) => match record.result_view(service.catalog()) {
            Some(view) => (StatusCode::OK, axum::Json(view)).into_response(),
            None => error_response(QuizServiceError::Repository(RepositoryError::Unavailable(
                "completed session has no result".to_string(),
            ))),
        },
        Err(error) => error_response(error),
    }
}

fn error_response(error: QuizServiceError) -> Response {
    let status = match &error {
        QuizServiceError::Wizard(WizardError::AlreadyCompleted) => StatusCode::CONFLICT,
        QuizServiceError::Wizard(_) => StatusCode::UNPROCESSABLE_ENTITY,
        QuizServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        QuizServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        QuizServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        QuizServiceError::Notify(NotifyError::Transport(_)) => StatusCode::BAD_GATEWAY,
    };

    let retriable = matches!(&error, QuizServiceError::Notify(_));
    let payload = if retriable {
        json!({ "error": error.to_string(), "retriable": true })
    } else {
        json!({ "error": error.to_string() })
    };

    (status, axum::Json(payload)).into_response()
}
