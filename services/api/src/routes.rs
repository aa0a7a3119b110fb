use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use mold_quiz::quiz::{
    quiz_router, Answer, ContactNotifier, Profile, ProfileCatalog, ProfileId, QuestionBank,
    QuizSessionService, ScoreComponent, ScoringEngine, SessionRepository,
};

#[derive(Debug, Deserialize)]
pub(crate) struct ScorePreviewRequest {
    /// Answers keyed by question id, in the same shape the session API uses.
    pub(crate) answers: BTreeMap<String, Answer>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScorePreviewResponse {
    pub(crate) score: u8,
    pub(crate) profile: ProfileId,
    pub(crate) components: Vec<ScoreComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) guidance: Option<Profile>,
}

pub(crate) fn with_quiz_routes<R, N>(service: Arc<QuizSessionService<R, N>>) -> axum::Router
where
    R: SessionRepository + 'static,
    N: ContactNotifier + 'static,
{
    quiz_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/quiz/score",
            axum::routing::post(score_preview_endpoint),
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

/// Score an answer payload without creating a session. Useful for embedding
/// the rubric in other front ends and for smoke-testing rubric changes.
/// Unknown questions and option values are dropped before scoring, so a
/// malformed payload cannot inflate the count-based subscores.
pub(crate) async fn score_preview_endpoint(
    Json(payload): Json<ScorePreviewRequest>,
) -> Json<ScorePreviewResponse> {
    let answers = QuestionBank::standard().sanitized_store(payload.answers);
    let outcome = ScoringEngine::new().evaluate(&answers);
    let guidance = ProfileCatalog::standard().get(outcome.profile).cloned();

    Json(ScorePreviewResponse {
        score: outcome.score,
        profile: outcome.profile,
        components: outcome.components,
        guidance,
    })
}
