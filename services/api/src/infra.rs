use metrics_exporter_prometheus::PrometheusHandle;
use quota_levy::config::LevyConfig;
use quota_levy::registry::{
    CompanyRegistry, InMemoryManualCompanyStore, JsonFileManualCompanyStore, ManualCompany,
    ManualCompanyStore, RepositoryError,
};
use quota_levy::{CostComparator, LevyPolicy};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) policy: Arc<LevyPolicy>,
    pub(crate) comparator: Arc<CostComparator>,
}

impl AppState {
    pub(crate) fn new(policy: LevyPolicy, metrics: PrometheusHandle) -> Self {
        let comparator = CostComparator::new(&policy);
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            policy: Arc::new(policy),
            comparator: Arc::new(comparator),
        }
    }
}

/// Manual-company backend chosen at startup.
pub(crate) enum ManualStoreBackend {
    Memory(InMemoryManualCompanyStore),
    JsonFile(JsonFileManualCompanyStore),
}

impl ManualStoreBackend {
    pub(crate) fn from_config(config: &LevyConfig) -> Self {
        match &config.manual_store_path {
            Some(path) => {
                info!(path = %path.display(), "manual companies persisted to file");
                Self::JsonFile(JsonFileManualCompanyStore::new(path.clone()))
            }
            None => {
                info!("manual companies kept in memory");
                Self::Memory(InMemoryManualCompanyStore::default())
            }
        }
    }
}

impl ManualCompanyStore for ManualStoreBackend {
    fn load(&self) -> Result<Vec<ManualCompany>, RepositoryError> {
        match self {
            Self::Memory(store) => store.load(),
            Self::JsonFile(store) => store.load(),
        }
    }

    fn save_all(&self, companies: &[ManualCompany]) -> Result<(), RepositoryError> {
        match self {
            Self::Memory(store) => store.save_all(companies),
            Self::JsonFile(store) => store.save_all(companies),
        }
    }
}

pub(crate) type Registry = CompanyRegistry<ManualStoreBackend>;

pub(crate) fn build_registry(
    policy: &LevyPolicy,
    config: &LevyConfig,
) -> Result<Arc<Registry>, quota_levy::registry::RegistryError> {
    let store = Arc::new(ManualStoreBackend::from_config(config));
    Ok(Arc::new(CompanyRegistry::new(policy, store)?))
}

pub(crate) fn parse_ratio(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    let (value, is_percent) = match trimmed.strip_suffix('%') {
        Some(stripped) => (stripped.trim(), true),
        None => (trimmed, false),
    };
    let parsed: f64 = value
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a tax rate ({err})"))?;
    Ok(if is_percent || parsed > 1.0 {
        parsed / 100.0
    } else {
        parsed
    })
}
