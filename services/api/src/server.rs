use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository, RecordingContactNotifier};
use crate::routes::with_quiz_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mold_quiz::config::AppConfig;
use mold_quiz::error::AppError;
use mold_quiz::quiz::{ProfileCatalog, QuestionBank, QuizSessionService};
use mold_quiz::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySessionRepository::default());
    let notifier = Arc::new(RecordingContactNotifier::default());
    let session_service = Arc::new(QuizSessionService::new(
        Arc::new(QuestionBank::standard()),
        Arc::new(ProfileCatalog::standard()),
        repository,
        notifier,
    ));

    let app = with_quiz_routes(session_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mold assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
