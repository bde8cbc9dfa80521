use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::levy::Sector;
use crate::policy::LevyPolicy;
use crate::priority::PriorityTier;
use crate::registry::domain::{ManualCompany, ManualCompanyInput};
use crate::registry::repository::{ManualCompanyStore, RepositoryError};
use crate::registry::{CompanyRegistry, InMemoryManualCompanyStore};

pub(super) fn policy() -> LevyPolicy {
    LevyPolicy::vintage_2025()
}

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_registry() -> (
    CompanyRegistry<InMemoryManualCompanyStore>,
    Arc<InMemoryManualCompanyStore>,
) {
    let store = Arc::new(InMemoryManualCompanyStore::default());
    let registry = CompanyRegistry::new(&policy(), store.clone()).expect("bundled dataset loads");
    (registry, store)
}

/// 500-person public body with four disabled staff.
pub(super) fn public_input() -> ManualCompanyInput {
    ManualCompanyInput {
        name: "  테스트공단  ".to_string(),
        industry: "공공기관".to_string(),
        region: "세종특별자치시 어진동".to_string(),
        sector: Sector::Public,
        total_workers: 500,
        hired_count: 4,
        contact: Some("인사팀".to_string()),
        priority_override: None,
    }
}

/// 200-person private firm two heads short.
pub(super) fn small_private_input() -> ManualCompanyInput {
    ManualCompanyInput {
        name: "Acme Robotics".to_string(),
        industry: "제조업".to_string(),
        region: "경기 성남시".to_string(),
        sector: Sector::Private,
        total_workers: 200,
        hired_count: 5,
        contact: None,
        priority_override: None,
    }
}

pub(super) fn compliant_input(priority_override: Option<PriorityTier>) -> ManualCompanyInput {
    ManualCompanyInput {
        name: "Compliant Co".to_string(),
        industry: "서비스업".to_string(),
        region: "서울 중구".to_string(),
        sector: Sector::Private,
        total_workers: 100,
        hired_count: 5,
        contact: None,
        priority_override,
    }
}

pub(super) struct UnavailableStore;

impl ManualCompanyStore for UnavailableStore {
    fn load(&self) -> Result<Vec<ManualCompany>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn save_all(&self, _companies: &[ManualCompany]) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }
}

/// Loads fine, refuses every write.
#[derive(Default)]
pub(super) struct ReadOnlyStore {
    pub(super) inner: InMemoryManualCompanyStore,
}

impl ManualCompanyStore for ReadOnlyStore {
    fn load(&self) -> Result<Vec<ManualCompany>, RepositoryError> {
        self.inner.load()
    }

    fn save_all(&self, _companies: &[ManualCompany]) -> Result<(), RepositoryError> {
        Err(RepositoryError::Write(std::io::Error::new(
            std::io::ErrorKind::Other,
            "quota exceeded",
        )))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
