//! Company registry backing the sales-targeting view.
//!
//! The bundled dataset is read-only. Manually entered companies live behind a
//! [`ManualCompanyStore`] and are assessed with the manual-entry quota rule.

pub mod assessor;
pub mod dataset;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use assessor::CompanyAssessor;
pub use dataset::{bundled_companies, parse_companies, DatasetError};
pub use domain::{
    CompanyId, CompanyOrigin, CompanyProfile, CompanyRecord, ContactRecord, ContactStatus,
    ManualCompany, ManualCompanyInput,
};
pub use repository::{
    ContactLookup, InMemoryContactBook, InMemoryManualCompanyStore, JsonFileManualCompanyStore,
    ManualCompanyStore, RepositoryError,
};
pub use router::company_router;
pub use service::{CompanyRegistry, RegistryError};
pub use summary::{
    industries, industry_deficits, regions, sales_targets, summarize, top_by_levy, CompanyQuery,
    IndustryDeficit, PriorityBreakdown, RegistrySummary, SalesTarget, SortDirection, SortKey,
};
