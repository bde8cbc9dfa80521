use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use quota_levy::comparator::ComparisonView;
use quota_levy::error::AppError;
use quota_levy::input::clamp_count;
use quota_levy::levy::EmploymentRate;
use quota_levy::priority;
use quota_levy::registry::{company_router, CompanyRegistry, ManualCompanyStore};
use quota_levy::{
    ComparisonResult, HiringRecord, LevyAssessment, LevyPolicy, QuotaContext, QuotaEngine,
    ScenarioRequest, Sector, ViewMode, WorkforceProfile,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct AssessRequest {
    pub(crate) total_workers: i64,
    #[serde(default = "default_sector")]
    pub(crate) sector: Sector,
    #[serde(default)]
    pub(crate) mild: i64,
    #[serde(default)]
    pub(crate) severe: i64,
    #[serde(default = "default_context")]
    pub(crate) context: QuotaContext,
}

fn default_sector() -> Sector {
    Sector::Private
}

fn default_context() -> QuotaContext {
    QuotaContext::Calculator
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessResponse {
    pub(crate) context: QuotaContext,
    pub(crate) workforce: WorkforceProfile,
    pub(crate) hiring: HiringRecord,
    #[serde(flatten)]
    pub(crate) assessment: LevyAssessment,
    pub(crate) tier_label: &'static str,
    pub(crate) employment_rate: Option<EmploymentRate>,
    pub(crate) is_publicly_named: bool,
    pub(crate) monthly_levy_display: String,
    pub(crate) annual_levy_display: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    #[serde(flatten)]
    pub(crate) scenario: ScenarioRequest,
    #[serde(default)]
    pub(crate) view: ViewMode,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompareResponse {
    pub(crate) mandatory_count: u32,
    pub(crate) fulfilment_percent: u32,
    pub(crate) result: ComparisonResult,
    pub(crate) view: ComparisonView,
}

pub(crate) fn with_levy_routes<S>(registry: Arc<CompanyRegistry<S>>) -> axum::Router
where
    S: ManualCompanyStore + 'static,
{
    company_router(registry)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/policy", axum::routing::get(policy_endpoint))
        .route("/api/v1/levy/assess", axum::routing::post(assess_endpoint))
        .route("/api/v1/levy/compare", axum::routing::post(compare_endpoint))
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

pub(crate) async fn policy_endpoint(Extension(state): Extension<AppState>) -> Json<LevyPolicy> {
    Json(state.policy.as_ref().clone())
}

pub(crate) async fn assess_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AssessRequest>,
) -> Json<AssessResponse> {
    Json(assess(&state.policy, payload))
}

pub(crate) fn assess(policy: &LevyPolicy, request: AssessRequest) -> AssessResponse {
    let workforce = WorkforceProfile::new(clamp_count(request.total_workers), request.sector);
    let hiring = HiringRecord::new(clamp_count(request.mild), clamp_count(request.severe));
    let engine = QuotaEngine::for_context(policy, request.context);
    let assessment = engine.assess_hiring(&workforce, &hiring);
    let employment_rate = EmploymentRate::of(assessment.recognized_headcount, workforce.total_workers);
    let is_publicly_named = priority::is_publicly_named(
        assessment.recognized_headcount,
        workforce.total_workers,
        policy.disclosure.threshold,
    );

    debug!(
        context = request.context.label(),
        mandatory = assessment.mandatory_count,
        shortfall = assessment.shortfall,
        "levy assessed"
    );

    AssessResponse {
        context: request.context,
        workforce,
        hiring,
        tier_label: assessment.tier.label(),
        employment_rate,
        is_publicly_named,
        monthly_levy_display: assessment.monthly_levy.to_string(),
        annual_levy_display: assessment.annual_levy.to_string(),
        assessment,
    }
}

pub(crate) async fn compare_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let input = payload.scenario.into_input()?;
    let result = state.comparator.compare(&input);
    let view = result.view(payload.view);

    Ok(Json(CompareResponse {
        mandatory_count: result.mandatory_count(),
        fulfilment_percent: result.fulfilment_percent(),
        view,
        result,
    }))
}
