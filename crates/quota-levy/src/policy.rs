//! Policy-year constants as swappable data.
//!
//! [`LevyPolicy::vintage_2025`] is the built-in table. A JSON file with the same
//! shape (see `data/policy_2025.json`) replaces it without code changes.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::levy::{
    IncentiveSchedule, PenaltyRateTable, QuotaContext, QuotaRule, RoundingMode, ServiceRateTable,
    WageSchedule, Won, PRIVATE_QUOTA, PUBLIC_QUOTA_POLICY, PUBLIC_QUOTA_SALES,
};
use crate::priority::{DisclosurePolicy, PriorityThresholds};

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid policy JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("policy {year} rejected: {reason}")]
    Invalid { year: u16, reason: String },
}

/// Quota rules per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaRules {
    pub sales_dataset: QuotaRule,
    pub manual_entry: QuotaRule,
    pub calculator: QuotaRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevyPolicy {
    pub year: u16,
    pub quotas: QuotaRules,
    pub penalty_rates: PenaltyRateTable,
    pub service_rates: ServiceRateTable,
    pub wages: WageSchedule,
    pub incentive: IncentiveSchedule,
    pub disclosure: DisclosurePolicy,
    pub priority: PriorityThresholds,
}

impl LevyPolicy {
    pub fn vintage_2025() -> Self {
        Self {
            year: 2025,
            quotas: QuotaRules {
                sales_dataset: QuotaRule {
                    private: PRIVATE_QUOTA,
                    public: PUBLIC_QUOTA_SALES,
                    rounding: RoundingMode::Ceil,
                },
                manual_entry: QuotaRule {
                    private: PRIVATE_QUOTA,
                    public: PUBLIC_QUOTA_POLICY,
                    rounding: RoundingMode::Ceil,
                },
                calculator: QuotaRule {
                    private: PRIVATE_QUOTA,
                    public: PUBLIC_QUOTA_POLICY,
                    rounding: RoundingMode::Floor,
                },
            },
            penalty_rates: PenaltyRateTable::VINTAGE_2025,
            service_rates: ServiceRateTable::VINTAGE_2025,
            wages: WageSchedule::VINTAGE_2026,
            incentive: IncentiveSchedule::AVERAGE_2025,
            disclosure: DisclosurePolicy::default(),
            priority: PriorityThresholds::default(),
        }
    }

    pub fn quota_rule(&self, context: QuotaContext) -> &QuotaRule {
        match context {
            QuotaContext::SalesDataset => &self.quotas.sales_dataset,
            QuotaContext::ManualEntry => &self.quotas.manual_entry,
            QuotaContext::Calculator => &self.quotas.calculator,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PolicyError> {
        let policy: LevyPolicy = serde_json::from_reader(reader)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let reject = |reason: String| PolicyError::Invalid {
            year: self.year,
            reason,
        };

        let rates = self.penalty_rates.descending();
        if rates.windows(2).any(|pair| pair[0] < pair[1]) {
            return Err(reject(
                "penalty rates must not increase as compliance rises".to_string(),
            ));
        }
        if rates.iter().any(|rate| rate.is_negative()) {
            return Err(reject("penalty rates must be non-negative".to_string()));
        }

        for (name, rule) in [
            ("sales_dataset", &self.quotas.sales_dataset),
            ("manual_entry", &self.quotas.manual_entry),
            ("calculator", &self.quotas.calculator),
        ] {
            if rule.private.basis_points() == 0 || rule.public.basis_points() == 0 {
                return Err(reject(format!("{name} quota ratios must be positive")));
            }
        }

        if self.service_rates.one_year <= Won::ZERO || self.service_rates.three_year <= Won::ZERO {
            return Err(reject("service rates must be positive".to_string()));
        }
        if self.wages.working_days_per_month == 0 || self.wages.hourly_wage <= Won::ZERO {
            return Err(reject("wage schedule must be positive".to_string()));
        }
        if self.incentive.monthly_per_head.is_negative() {
            return Err(reject("incentive rate must be non-negative".to_string()));
        }
        if self.priority.tier_b_shortfall == 0
            || self.priority.tier_b_shortfall > self.priority.tier_a_shortfall
        {
            return Err(reject(format!(
                "priority thresholds must satisfy 0 < B ({}) <= A ({})",
                self.priority.tier_b_shortfall, self.priority.tier_a_shortfall
            )));
        }

        Ok(())
    }
}

impl Default for LevyPolicy {
    fn default() -> Self {
        Self::vintage_2025()
    }
}
