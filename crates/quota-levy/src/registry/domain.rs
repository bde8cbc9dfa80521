use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::{clamp_count, InvalidInput};
use crate::levy::{EmploymentRate, PenaltyTier, Sector, WorkforceProfile, Won};
use crate::priority::PriorityTier;

/// Registry identifier. Dataset rows use small ids, manual entries use
/// millisecond timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub u64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyOrigin {
    Dataset,
    Manual,
}

/// Facts about a company as entered or published. Nothing here is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: CompanyId,
    pub name: String,
    pub industry: String,
    pub industry_code: String,
    pub region: String,
    pub sector: Sector,
    pub total_workers: u32,
    /// Disabled employees on record. The published data does not split by severity.
    pub hired_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl CompanyProfile {
    pub fn workforce(&self) -> WorkforceProfile {
        WorkforceProfile::new(self.total_workers, self.sector)
    }

    /// First word of the address, e.g. `경북` for `경북 포항시`.
    pub fn region_prefix(&self) -> &str {
        self.region.split_whitespace().next().unwrap_or("")
    }
}

/// Manual entry as persisted by a [`ManualCompanyStore`](super::ManualCompanyStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualCompany {
    #[serde(flatten)]
    pub profile: CompanyProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_override: Option<PriorityTier>,
    pub created_at: DateTime<Utc>,
}

/// Profile joined with its levy estimate and sales priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(flatten)]
    pub profile: CompanyProfile,
    pub origin: CompanyOrigin,
    pub required_count: u32,
    pub gap: u32,
    pub tier: PenaltyTier,
    pub employment_rate: Option<EmploymentRate>,
    pub is_publicly_named: bool,
    pub estimated_annual_levy: Won,
    /// Effective priority: the override when one was entered, otherwise the
    /// computed tier. A compliant company only has one through an override.
    pub priority: Option<PriorityTier>,
    pub computed_priority: Option<PriorityTier>,
}

impl CompanyRecord {
    pub fn id(&self) -> CompanyId {
        self.profile.id
    }

    pub fn is_manual(&self) -> bool {
        self.origin == CompanyOrigin::Manual
    }

    pub fn has_deficit(&self) -> bool {
        self.gap > 0
    }

    /// Estimated levy in 만원, the unit the sales dataset was published in.
    pub fn estimated_levy_manwon(&self) -> i64 {
        self.estimated_annual_levy.manwon()
    }
}

/// Form fields for adding a company by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualCompanyInput {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub region: String,
    pub sector: Sector,
    pub total_workers: i64,
    #[serde(default)]
    pub hired_count: i64,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub priority_override: Option<PriorityTier>,
}

impl ManualCompanyInput {
    pub fn into_manual(self, id: CompanyId, created_at: DateTime<Utc>) -> Result<ManualCompany, InvalidInput> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(InvalidInput::EmptyName);
        }
        let total_workers = clamp_count(self.total_workers);
        if total_workers == 0 {
            return Err(InvalidInput::EmptyWorkforce);
        }
        let industry = self.industry.trim().to_string();
        let contact = self
            .contact
            .map(|contact| contact.trim().to_string())
            .filter(|contact| !contact.is_empty());

        Ok(ManualCompany {
            profile: CompanyProfile {
                id,
                name,
                industry_code: industry.clone(),
                industry,
                region: self.region.trim().to_string(),
                sector: self.sector,
                total_workers,
                hired_count: clamp_count(self.hired_count),
                contact,
            },
            priority_override: self.priority_override,
            created_at,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    None,
    Contacted,
    Meeting,
    Contracted,
    Rejected,
}

impl ContactStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ContactStatus::None => "not contacted",
            ContactStatus::Contacted => "contacted",
            ContactStatus::Meeting => "meeting held",
            ContactStatus::Contracted => "contract in progress",
            ContactStatus::Rejected => "on hold",
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, ContactStatus::None | ContactStatus::Contacted | ContactStatus::Meeting)
    }
}

/// Sales contact log for one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub company_id: CompanyId,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub memo: String,
    pub updated_at: DateTime<Utc>,
}
