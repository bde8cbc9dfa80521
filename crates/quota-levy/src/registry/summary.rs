//! Aggregates over a slice of registry records.
//!
//! Every figure is recomputed from the slice on each call.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::levy::{Sector, Won};
use crate::priority::PriorityTier;

use super::domain::{CompanyRecord, ContactStatus};
use super::repository::ContactLookup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Gap,
    EstimatedLevy,
    TotalWorkers,
    EmploymentRate,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Filters applied by the company table. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyQuery {
    pub deficit_only: bool,
    pub publicly_named_only: bool,
    pub priority: Option<PriorityTier>,
    pub sector: Option<Sector>,
    pub industry: Option<String>,
    pub region: Option<String>,
    /// Case-insensitive match on name, plain match on industry.
    pub search: Option<String>,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub limit: Option<usize>,
}

impl CompanyQuery {
    pub fn matches(&self, record: &CompanyRecord) -> bool {
        if self.deficit_only && !record.has_deficit() {
            return false;
        }
        if self.publicly_named_only && !record.is_publicly_named {
            return false;
        }
        if self.priority.is_some() && record.priority != self.priority {
            return false;
        }
        if self.sector.is_some_and(|sector| record.profile.sector != sector) {
            return false;
        }
        if let Some(industry) = self.industry.as_deref() {
            if record.profile.industry != industry {
                return false;
            }
        }
        if let Some(region) = self.region.as_deref() {
            if !record.profile.region.starts_with(region) {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !record.profile.name.to_lowercase().contains(&needle)
                && !record.profile.industry.contains(search)
            {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, records: &'a [CompanyRecord]) -> Vec<&'a CompanyRecord> {
        let mut matched: Vec<&CompanyRecord> =
            records.iter().filter(|record| self.matches(record)).collect();

        matched.sort_by(|a, b| {
            let ordering = match self.sort {
                SortKey::Gap => a.gap.cmp(&b.gap),
                SortKey::EstimatedLevy => a.estimated_annual_levy.cmp(&b.estimated_annual_levy),
                SortKey::TotalWorkers => a.profile.total_workers.cmp(&b.profile.total_workers),
                SortKey::EmploymentRate => a.employment_rate.cmp(&b.employment_rate),
                SortKey::Name => a.profile.name.cmp(&b.profile.name),
            };
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub companies: usize,
    pub total_gap: u64,
    pub total_levy: Won,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryDeficit {
    pub industry: String,
    pub companies: usize,
    pub total_gap: u64,
    pub tier_a: usize,
    pub total_levy: Won,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub total_companies: usize,
    pub manual_companies: usize,
    pub deficit_companies: usize,
    /// Share of companies with a shortfall, in percent.
    pub deficit_share: f64,
    pub total_gap: u64,
    pub total_estimated_levy: Won,
    pub publicly_named: usize,
    pub by_priority: BTreeMap<PriorityTier, PriorityBreakdown>,
}

pub fn summarize(records: &[CompanyRecord]) -> RegistrySummary {
    let deficit: Vec<&CompanyRecord> = records.iter().filter(|record| record.has_deficit()).collect();

    let mut by_priority: BTreeMap<PriorityTier, PriorityBreakdown> = PriorityTier::ordered()
        .into_iter()
        .map(|tier| (tier, PriorityBreakdown::default()))
        .collect();
    for record in deficit.iter() {
        if let Some(breakdown) = record.priority.and_then(|tier| by_priority.get_mut(&tier)) {
            breakdown.companies += 1;
            breakdown.total_gap += u64::from(record.gap);
            breakdown.total_levy += record.estimated_annual_levy;
        }
    }

    let deficit_share = if records.is_empty() {
        0.0
    } else {
        deficit.len() as f64 / records.len() as f64 * 100.0
    };

    RegistrySummary {
        total_companies: records.len(),
        manual_companies: records.iter().filter(|record| record.is_manual()).count(),
        deficit_companies: deficit.len(),
        deficit_share,
        total_gap: deficit.iter().map(|record| u64::from(record.gap)).sum(),
        total_estimated_levy: deficit.iter().map(|record| record.estimated_annual_levy).sum(),
        publicly_named: records.iter().filter(|record| record.is_publicly_named).count(),
        by_priority,
    }
}

/// Deficit companies grouped by industry, largest total gap first.
pub fn industry_deficits(records: &[CompanyRecord]) -> Vec<IndustryDeficit> {
    let mut groups: BTreeMap<&str, IndustryDeficit> = BTreeMap::new();
    for record in records.iter().filter(|record| record.has_deficit()) {
        let entry = groups
            .entry(record.profile.industry.as_str())
            .or_insert_with(|| IndustryDeficit {
                industry: record.profile.industry.clone(),
                companies: 0,
                total_gap: 0,
                tier_a: 0,
                total_levy: Won::ZERO,
            });
        entry.companies += 1;
        entry.total_gap += u64::from(record.gap);
        entry.total_levy += record.estimated_annual_levy;
        if record.priority == Some(PriorityTier::A) {
            entry.tier_a += 1;
        }
    }

    let mut deficits: Vec<IndustryDeficit> = groups.into_values().collect();
    deficits.sort_by_key(|deficit| Reverse(deficit.total_gap));
    deficits
}

/// Deficit companies with the largest estimated levy.
pub fn top_by_levy(records: &[CompanyRecord], limit: usize) -> Vec<&CompanyRecord> {
    let mut deficit: Vec<&CompanyRecord> = records.iter().filter(|record| record.has_deficit()).collect();
    deficit.sort_by_key(|record| Reverse(record.estimated_annual_levy));
    deficit.truncate(limit);
    deficit
}

pub fn industries(records: &[CompanyRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.profile.industry.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn regions(records: &[CompanyRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.profile.region_prefix().to_string())
        .filter(|prefix| !prefix.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A sales target with its latest contact status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesTarget<'a> {
    pub company: &'a CompanyRecord,
    pub contact_status: ContactStatus,
}

/// Prioritised deficit companies joined with contact history, open leads only.
pub fn sales_targets<'a, L>(records: &'a [CompanyRecord], contacts: &L) -> Vec<SalesTarget<'a>>
where
    L: ContactLookup + ?Sized,
{
    let mut targets: Vec<SalesTarget<'a>> = records
        .iter()
        .filter(|record| record.has_deficit() && record.priority.is_some())
        .map(|company| SalesTarget {
            company,
            contact_status: contacts
                .contact(company.id())
                .map(|contact| contact.status)
                .unwrap_or_default(),
        })
        .filter(|target| target.contact_status.is_open())
        .collect();
    targets.sort_by_key(|target| (target.company.priority, Reverse(target.company.gap)));
    targets
}
