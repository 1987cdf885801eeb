use crate::cli::ServeArgs;
use crate::infra::{demo_interviews, AppState, InMemoryInterviewGateway};
use crate::routes::with_interview_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hireflow::config::AppConfig;
use hireflow::error::AppError;
use hireflow::telemetry;
use hireflow::workflows::interviews::InterviewActionService;
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

    let gateway = match &config.interviews.seed_path {
        Some(path) => InMemoryInterviewGateway::from_seed_file(path)?,
        None => InMemoryInterviewGateway::seeded(demo_interviews()),
    };
    info!(interviews = gateway.ids().len(), "interview gateway loaded");

    let interview_service = Arc::new(InterviewActionService::new(Arc::new(gateway)));

    let app = with_interview_routes(interview_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "interview eligibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
