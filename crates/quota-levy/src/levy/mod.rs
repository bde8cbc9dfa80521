//! Rate tables and the quota engine.
//!
//! Every levy figure in the crate, from the interactive calculator to the
//! per-company estimates in the registry, goes through [`QuotaEngine::assess`].

mod money;
mod quota;
mod rates;
mod tier;

pub use money::{ViewMode, Won};
pub(crate) use money::round_div;
pub use quota::{
    compute_mandatory_count, compute_recognized_headcount, compute_shortfall, ComplianceRatio,
    EmploymentRate, HiringRecord, QuotaContext, QuotaRatio, QuotaRule, RoundingMode, Sector,
    WorkforceProfile, PRIVATE_QUOTA, PUBLIC_QUOTA_POLICY, PUBLIC_QUOTA_SALES,
    SEVERE_HEADCOUNT_WEIGHT,
};
pub use rates::{
    ContractTerm, IncentiveSchedule, PenaltyRateTable, ServiceRateTable, UnsupportedContractTerm,
    WageSchedule,
};
pub use tier::PenaltyTier;

use serde::{Deserialize, Serialize};

use crate::policy::LevyPolicy;

/// Levy position of one workforce at one recognized headcount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevyAssessment {
    pub mandatory_count: u32,
    pub recognized_headcount: u32,
    pub shortfall: u32,
    pub tier: PenaltyTier,
    pub monthly_rate: Won,
    pub monthly_levy: Won,
    pub annual_levy: Won,
}

impl LevyAssessment {
    pub fn compliance_ratio(&self) -> Option<ComplianceRatio> {
        ComplianceRatio::of(self.recognized_headcount, self.mandatory_count)
    }

    /// Recognized heads above the mandatory count.
    pub fn excess_headcount(&self) -> u32 {
        self.recognized_headcount
            .saturating_sub(self.mandatory_count)
    }
}

/// Stateless engine bound to one quota rule and one rate table.
#[derive(Debug, Clone)]
pub struct QuotaEngine {
    rule: QuotaRule,
    penalty_rates: PenaltyRateTable,
}

impl QuotaEngine {
    pub fn new(rule: QuotaRule, penalty_rates: PenaltyRateTable) -> Self {
        Self {
            rule,
            penalty_rates,
        }
    }

    pub fn for_context(policy: &LevyPolicy, context: QuotaContext) -> Self {
        Self::new(*policy.quota_rule(context), policy.penalty_rates)
    }

    pub fn rule(&self) -> &QuotaRule {
        &self.rule
    }

    pub fn penalty_rates(&self) -> &PenaltyRateTable {
        &self.penalty_rates
    }

    pub fn mandatory_count(&self, workforce: &WorkforceProfile) -> u32 {
        self.rule.mandatory_count(workforce)
    }

    pub fn monthly_levy(&self, shortfall: u32, recognized_headcount: u32, mandatory_count: u32) -> Won {
        self.penalty_rates
            .monthly_levy(shortfall, recognized_headcount, mandatory_count)
    }

    pub fn assess(&self, workforce: &WorkforceProfile, recognized_headcount: u32) -> LevyAssessment {
        let mandatory_count = self.mandatory_count(workforce);
        let shortfall = compute_shortfall(recognized_headcount, mandatory_count);
        let tier = PenaltyTier::classify(recognized_headcount, mandatory_count);
        let monthly_rate = self.penalty_rates.monthly_rate(tier);
        let monthly_levy = self.monthly_levy(shortfall, recognized_headcount, mandatory_count);

        LevyAssessment {
            mandatory_count,
            recognized_headcount,
            shortfall,
            tier,
            monthly_rate,
            monthly_levy,
            annual_levy: monthly_levy.annualized(),
        }
    }

    pub fn assess_hiring(&self, workforce: &WorkforceProfile, hiring: &HiringRecord) -> LevyAssessment {
        self.assess(workforce, hiring.recognized_headcount())
    }
}
