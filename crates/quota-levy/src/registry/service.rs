use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::input::InvalidInput;
use crate::policy::LevyPolicy;

use super::assessor::CompanyAssessor;
use super::dataset::{self, DatasetError};
use super::domain::{CompanyId, CompanyProfile, CompanyRecord, ManualCompany, ManualCompanyInput};
use super::repository::{ManualCompanyStore, RepositoryError};
use super::summary::{self, CompanyQuery, RegistrySummary};

/// Bundled dataset plus the manual subset held in `S`.
///
/// Dataset records are assessed once in [`CompanyRegistry::new`]. Manual
/// records are reloaded from the store on every read.
pub struct CompanyRegistry<S> {
    assessor: CompanyAssessor,
    dataset: Vec<CompanyRecord>,
    store: Arc<S>,
}

impl<S> CompanyRegistry<S>
where
    S: ManualCompanyStore + 'static,
{
    /// Registry over the bundled 190-company dataset.
    pub fn new(policy: &LevyPolicy, store: Arc<S>) -> Result<Self, RegistryError> {
        let profiles = dataset::bundled_companies()?;
        Ok(Self::from_profiles(policy, profiles, store))
    }

    pub fn from_profiles(
        policy: &LevyPolicy,
        profiles: Vec<CompanyProfile>,
        store: Arc<S>,
    ) -> Self {
        let assessor = CompanyAssessor::new(policy);
        let dataset: Vec<CompanyRecord> = profiles
            .into_iter()
            .map(|profile| assessor.assess_dataset(profile))
            .collect();
        info!(companies = dataset.len(), "company dataset assessed");

        Self {
            assessor,
            dataset,
            store,
        }
    }

    pub fn assessor(&self) -> &CompanyAssessor {
        &self.assessor
    }

    pub fn dataset(&self) -> &[CompanyRecord] {
        &self.dataset
    }

    pub fn manual(&self) -> Result<Vec<CompanyRecord>, RegistryError> {
        let stored = self.store.load()?;
        Ok(stored
            .into_iter()
            .map(|company| self.assessor.assess_manual(company))
            .collect())
    }

    /// Dataset records followed by manual ones in insertion order.
    pub fn all(&self) -> Result<Vec<CompanyRecord>, RegistryError> {
        let mut records = self.dataset.clone();
        records.extend(self.manual()?);
        Ok(records)
    }

    pub fn query(&self, query: &CompanyQuery) -> Result<Vec<CompanyRecord>, RegistryError> {
        let records = self.all()?;
        Ok(query.apply(&records).into_iter().cloned().collect())
    }

    pub fn summary(&self) -> Result<RegistrySummary, RegistryError> {
        Ok(summary::summarize(&self.all()?))
    }

    pub fn add_manual(&self, input: ManualCompanyInput) -> Result<CompanyRecord, RegistryError> {
        self.add_manual_at(input, Utc::now())
    }

    /// Adds an entry stamped with `now`. The id is `now` in milliseconds,
    /// bumped past any id already in use.
    pub fn add_manual_at(
        &self,
        input: ManualCompanyInput,
        now: DateTime<Utc>,
    ) -> Result<CompanyRecord, RegistryError> {
        let mut stored = self.store.load()?;
        let id = self.next_id(&stored, now);
        let company = input.into_manual(id, now)?;

        stored.push(company.clone());
        self.store.save_all(&stored)?;
        debug!(id = %id, name = %company.profile.name, "manual company added");

        Ok(self.assessor.assess_manual(company))
    }

    /// Removing an unknown id is a no-op.
    pub fn remove_manual(&self, id: CompanyId) -> Result<bool, RegistryError> {
        let mut stored = self.store.load()?;
        let before = stored.len();
        stored.retain(|company| company.profile.id != id);
        let removed = stored.len() != before;

        self.store.save_all(&stored)?;
        if removed {
            debug!(id = %id, "manual company removed");
        }
        Ok(removed)
    }

    fn next_id(&self, stored: &[ManualCompany], now: DateTime<Utc>) -> CompanyId {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let highest = stored
            .iter()
            .map(|company| company.profile.id.0)
            .chain(self.dataset.iter().map(|record| record.id().0))
            .max()
            .unwrap_or(0);
        CompanyId(candidate.max(highest.saturating_add(1)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Invalid(#[from] InvalidInput),
}
