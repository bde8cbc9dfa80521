use crate::cli::ServeArgs;
use crate::infra::{build_registry, AppState};
use crate::routes::with_levy_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use quota_levy::config::AppConfig;
use quota_levy::error::AppError;
use quota_levy::telemetry;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.manual_store.take() {
        config.levy.manual_store_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let policy = config.levy.load_policy()?;
    let registry = build_registry(&policy, &config.levy)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(policy, prometheus_handle);
    let readiness_flag = app_state.readiness.clone();
    let policy_year = app_state.policy.year;

    let app = with_levy_routes(registry)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, policy_year, "levy service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
