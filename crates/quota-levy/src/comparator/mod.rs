//! Current-versus-after hiring comparison for the interactive calculator.
//!
//! [`CostComparator::compare`] is a pure function of its [`ScenarioInput`]. Both
//! levy states come from the same [`QuotaEngine`], so the calculator and the
//! registry can never disagree on a tier or a rate.

mod costs;
mod scenario;
mod views;

#[cfg(test)]
mod tests;

pub use costs::{ContractComparison, CostBreakdown, ExcessIncentive, SavingOutcome, TaxAdjustedCosts};
pub use scenario::{HoursPerDay, ScenarioInput, ScenarioRequest, TaxBracket};
pub use views::{AmountView, ComparisonView};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::levy::{
    ComplianceRatio, ContractTerm, IncentiveSchedule, LevyAssessment, QuotaContext, QuotaEngine,
    ServiceRateTable, ViewMode, WageSchedule, Won,
};
use crate::policy::LevyPolicy;

/// Disclosure exposure as the calculator frames it, by compliance ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureRisk {
    /// Below half of the quota before hiring.
    pub current_at_risk: bool,
    /// At risk now but at or above half after hiring.
    pub resolved_after: bool,
}

impl DisclosureRisk {
    fn between(current: &LevyAssessment, after: &LevyAssessment) -> Self {
        let below_half = |assessment: &LevyAssessment| {
            ComplianceRatio::of(assessment.recognized_headcount, assessment.mandatory_count)
                .map(|ratio| ratio.is_below(1, 2))
                .unwrap_or(false)
        };
        let current_at_risk = below_half(current);
        Self {
            current_at_risk,
            resolved_after: current_at_risk && !below_half(after),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub input: ScenarioInput,
    pub current: LevyAssessment,
    pub after: LevyAssessment,
    pub additional_headcount: u32,
    /// May be zero or negative.
    pub levy_saving: Won,
    pub monthly_wage_per_hire: Won,
    pub costs: CostBreakdown,
    pub tax: TaxAdjustedCosts,
    pub incentive: ExcessIncentive,
    pub contracts: ContractComparison,
    pub disclosure_risk: DisclosureRisk,
}

impl ComparisonResult {
    pub fn mandatory_count(&self) -> u32 {
        self.after.mandatory_count
    }

    /// Quota fulfilment after hiring, as a whole percent capped at 100.
    pub fn fulfilment_percent(&self) -> u32 {
        fulfilment_percent(&self.after)
    }

    pub fn view(&self, mode: ViewMode) -> ComparisonView {
        ComparisonView::new(self, mode)
    }
}

pub(crate) fn fulfilment_percent(assessment: &LevyAssessment) -> u32 {
    if assessment.mandatory_count == 0 {
        return 100;
    }
    let percent = crate::levy::round_div(
        i128::from(assessment.recognized_headcount) * 100,
        i128::from(assessment.mandatory_count),
    );
    percent.clamp(0, 100) as u32
}

#[derive(Debug, Clone)]
pub struct CostComparator {
    engine: QuotaEngine,
    service_rates: ServiceRateTable,
    wages: WageSchedule,
    incentive: IncentiveSchedule,
}

impl CostComparator {
    /// Comparator using the policy's calculator quota rule.
    pub fn new(policy: &LevyPolicy) -> Self {
        Self {
            engine: QuotaEngine::for_context(policy, QuotaContext::Calculator),
            service_rates: policy.service_rates,
            wages: policy.wages,
            incentive: policy.incentive,
        }
    }

    pub fn engine(&self) -> &QuotaEngine {
        &self.engine
    }

    pub fn compare(&self, input: &ScenarioInput) -> ComparisonResult {
        let current = self.engine.assess_hiring(&input.workforce, &input.current);
        let after = self
            .engine
            .assess_hiring(&input.workforce, &input.combined_hiring());
        let additional_headcount = input.additional_headcount();
        let monthly_wage_per_hire = self.wages.monthly_wage(input.hours_per_day.get());

        let price = |term: ContractTerm| {
            CostBreakdown::build(
                term,
                additional_headcount,
                self.service_rates.monthly_rate(term),
                monthly_wage_per_hire,
                current.annual_levy,
                after.annual_levy,
            )
        };
        let contracts = ContractComparison {
            one_year: price(ContractTerm::OneYear),
            three_year: price(ContractTerm::ThreeYear),
        };
        let costs = *contracts.for_term(input.contract);
        let tax = TaxAdjustedCosts::build(input.tax, current.annual_levy, after.annual_levy, &costs);
        let incentive = ExcessIncentive::build(after.excess_headcount(), self.incentive.monthly_per_head);

        debug!(
            total_workers = input.workforce.total_workers,
            mandatory = after.mandatory_count,
            current_tier = ?current.tier,
            after_tier = ?after.tier,
            net_saving = costs.net_saving.get(),
            "compared hiring scenario"
        );

        ComparisonResult {
            input: *input,
            current,
            after,
            additional_headcount,
            levy_saving: current.annual_levy - after.annual_levy,
            monthly_wage_per_hire,
            costs,
            tax,
            incentive,
            contracts,
            disclosure_risk: DisclosureRisk::between(&current, &after),
        }
    }
}
