use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use super::domain::{CompanyId, CompanyRecord, ManualCompanyInput};
use super::repository::ManualCompanyStore;
use super::service::{CompanyRegistry, RegistryError};
use super::summary::{self, CompanyQuery, IndustryDeficit, RegistrySummary};

const TOP_LEVY_LIMIT: usize = 10;

/// Router builder exposing the company registry.
pub fn company_router<S>(registry: Arc<CompanyRegistry<S>>) -> Router
where
    S: ManualCompanyStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/companies",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route("/api/v1/companies/summary", get(summary_handler::<S>))
        .route("/api/v1/companies/:company_id", delete(remove_handler::<S>))
        .with_state(registry)
}

#[derive(Debug, Serialize)]
struct CompanyListView {
    total: usize,
    companies: Vec<CompanyRecord>,
}

#[derive(Debug, Serialize)]
struct SummaryView {
    summary: RegistrySummary,
    industries: Vec<String>,
    regions: Vec<String>,
    industry_deficits: Vec<IndustryDeficit>,
    top_by_levy: Vec<CompanyRecord>,
}

pub(crate) async fn list_handler<S>(
    State(registry): State<Arc<CompanyRegistry<S>>>,
    Query(query): Query<CompanyQuery>,
) -> Response
where
    S: ManualCompanyStore + 'static,
{
    match registry.query(&query) {
        Ok(companies) => {
            let view = CompanyListView {
                total: companies.len(),
                companies,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => registry_error_response(err),
    }
}

pub(crate) async fn create_handler<S>(
    State(registry): State<Arc<CompanyRegistry<S>>>,
    axum::Json(input): axum::Json<ManualCompanyInput>,
) -> Response
where
    S: ManualCompanyStore + 'static,
{
    match registry.add_manual(input) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(err) => registry_error_response(err),
    }
}

pub(crate) async fn remove_handler<S>(
    State(registry): State<Arc<CompanyRegistry<S>>>,
    Path(company_id): Path<u64>,
) -> Response
where
    S: ManualCompanyStore + 'static,
{
    match registry.remove_manual(CompanyId(company_id)) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => {
            let payload = json!({
                "error": "manual company not found",
                "company_id": company_id,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => registry_error_response(err),
    }
}

pub(crate) async fn summary_handler<S>(State(registry): State<Arc<CompanyRegistry<S>>>) -> Response
where
    S: ManualCompanyStore + 'static,
{
    let records = match registry.all() {
        Ok(records) => records,
        Err(err) => return registry_error_response(err),
    };

    let view = SummaryView {
        summary: summary::summarize(&records),
        industries: summary::industries(&records),
        regions: summary::regions(&records),
        industry_deficits: summary::industry_deficits(&records),
        top_by_levy: summary::top_by_levy(&records, TOP_LEVY_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

fn registry_error_response(err: RegistryError) -> Response {
    let status = match &err {
        RegistryError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegistryError::Dataset(_) | RegistryError::Repository(_) => {
            error!(error = %err, "company registry request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
