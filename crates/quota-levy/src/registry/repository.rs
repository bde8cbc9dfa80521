use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use super::domain::{CompanyId, ContactRecord, ManualCompany};

/// Whole-collection storage for manually entered companies.
///
/// Callers read everything, change it in memory and write everything back.
/// There is no locking across that cycle, so two writers racing on the same
/// store can lose each other's additions.
pub trait ManualCompanyStore: Send + Sync {
    /// Unreadable or corrupt contents load as an empty list.
    fn load(&self) -> Result<Vec<ManualCompany>, RepositoryError>;
    fn save_all(&self, companies: &[ManualCompany]) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write manual companies: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to encode manual companies: {0}")]
    Encode(#[from] serde_json::Error),
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

#[derive(Debug, Default)]
pub struct InMemoryManualCompanyStore {
    companies: Mutex<Vec<ManualCompany>>,
}

impl InMemoryManualCompanyStore {
    pub fn with_companies(companies: Vec<ManualCompany>) -> Self {
        Self {
            companies: Mutex::new(companies),
        }
    }
}

impl ManualCompanyStore for InMemoryManualCompanyStore {
    fn load(&self) -> Result<Vec<ManualCompany>, RepositoryError> {
        Ok(lock(&self.companies)?.clone())
    }

    fn save_all(&self, companies: &[ManualCompany]) -> Result<(), RepositoryError> {
        *lock(&self.companies)? = companies.to_vec();
        Ok(())
    }
}

/// JSON array on disk, rewritten in full on every save.
///
/// Saves go to [`staging_path`](Self::staging_path) and are renamed into place,
/// so a torn write never replaces the previous collection.
#[derive(Debug, Clone)]
pub struct JsonFileManualCompanyStore {
    path: PathBuf,
}

impl JsonFileManualCompanyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file each save is written to before it replaces `path`.
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ManualCompanyStore for JsonFileManualCompanyStore {
    fn load(&self) -> Result<Vec<ManualCompany>, RepositoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "manual company store unreadable");
                return Ok(Vec::new());
            }
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&raw) {
            Ok(companies) => Ok(companies),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "manual company store corrupt, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, companies: &[ManualCompany]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_vec_pretty(companies)?;
        let staging = self.staging_path();
        fs::write(&staging, encoded)?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        Ok(())
    }
}

/// Contact history keyed by company.
pub trait ContactLookup: Send + Sync {
    fn contact(&self, id: CompanyId) -> Option<ContactRecord>;
}

impl ContactLookup for BTreeMap<CompanyId, ContactRecord> {
    fn contact(&self, id: CompanyId) -> Option<ContactRecord> {
        self.get(&id).cloned()
    }
}

/// Mutable contact log with the same whole-record replace semantics.
#[derive(Debug, Default)]
pub struct InMemoryContactBook {
    contacts: Mutex<BTreeMap<CompanyId, ContactRecord>>,
}

impl InMemoryContactBook {
    /// Replaces any existing record for the same company.
    pub fn save(&self, record: ContactRecord) -> Result<(), RepositoryError> {
        lock(&self.contacts)?.insert(record.company_id, record);
        Ok(())
    }

    pub fn delete(&self, id: CompanyId) -> Result<(), RepositoryError> {
        lock(&self.contacts)?.remove(&id);
        Ok(())
    }

    pub fn all(&self) -> Result<Vec<ContactRecord>, RepositoryError> {
        Ok(lock(&self.contacts)?.values().cloned().collect())
    }
}

impl ContactLookup for InMemoryContactBook {
    fn contact(&self, id: CompanyId) -> Option<ContactRecord> {
        lock(&self.contacts).ok()?.get(&id).cloned()
    }
}
