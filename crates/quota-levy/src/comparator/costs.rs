use serde::{Deserialize, Serialize};

use crate::levy::{ContractTerm, Won};

use super::scenario::TaxBracket;

/// Sign of a net figure, named for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingOutcome {
    NetSaving,
    BreakEven,
    NetCost,
}

impl SavingOutcome {
    pub fn of(amount: Won) -> Self {
        match amount.get() {
            0 => SavingOutcome::BreakEven,
            value if value > 0 => SavingOutcome::NetSaving,
            _ => SavingOutcome::NetCost,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SavingOutcome::NetSaving => "net saving",
            SavingOutcome::BreakEven => "break even",
            SavingOutcome::NetCost => "net additional cost",
        }
    }
}

/// Annual cost of carrying the additional hires under one contract length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub contract: ContractTerm,
    pub service_cost: Won,
    pub wage_cost: Won,
    pub total_cost_after: Won,
    /// Positive is a saving, negative an additional cost.
    pub net_saving: Won,
}

impl CostBreakdown {
    pub(crate) fn build(
        contract: ContractTerm,
        additional_headcount: u32,
        monthly_service_rate: Won,
        monthly_wage: Won,
        current_annual_levy: Won,
        after_annual_levy: Won,
    ) -> Self {
        let service_cost = monthly_service_rate.times(additional_headcount).annualized();
        let wage_cost = monthly_wage.times(additional_headcount).annualized();
        let total_cost_after = after_annual_levy + service_cost + wage_cost;

        Self {
            contract,
            service_cost,
            wage_cost,
            total_cost_after,
            net_saving: current_annual_levy - total_cost_after,
        }
    }

    pub fn outcome(&self) -> SavingOutcome {
        SavingOutcome::of(self.net_saving)
    }

    pub fn non_levy_cost(&self) -> Won {
        self.service_cost + self.wage_cost
    }
}

/// Figures after corporate tax.
///
/// The levy is not deductible and is grossed up by the tax rate. Service fees
/// and wages are deductible and shrink by it. Each figure is rounded once from
/// the exact product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAdjustedCosts {
    pub bracket: TaxBracket,
    pub current_levy_tax_burden: Won,
    pub current_effective_levy: Won,
    pub after_effective_levy: Won,
    pub service_tax_saving: Won,
    pub wage_tax_saving: Won,
    pub effective_total_cost_after: Won,
    pub effective_net_saving: Won,
    /// `effective_net_saving - net_saving`.
    pub tax_advantage: Won,
}

impl TaxAdjustedCosts {
    pub(crate) fn build(
        bracket: TaxBracket,
        current_annual_levy: Won,
        after_annual_levy: Won,
        costs: &CostBreakdown,
    ) -> Self {
        let rate = bracket.percent();
        let grossed = 100 + rate;
        let shielded = 100 - rate;

        let current = i128::from(current_annual_levy.get());
        let after = i128::from(after_annual_levy.get());
        let non_levy = i128::from(costs.non_levy_cost().get());

        let effective_total_cost_after = percent_of(after * i128::from(grossed) + non_levy * i128::from(shielded));
        let effective_net_saving = percent_of(
            (current - after) * i128::from(grossed) - non_levy * i128::from(shielded),
        );

        Self {
            bracket,
            current_levy_tax_burden: current_annual_levy.scale(rate, 100),
            current_effective_levy: current_annual_levy.scale(grossed, 100),
            after_effective_levy: after_annual_levy.scale(grossed, 100),
            service_tax_saving: costs.service_cost.scale(rate, 100),
            wage_tax_saving: costs.wage_cost.scale(rate, 100),
            effective_total_cost_after,
            effective_net_saving,
            tax_advantage: effective_net_saving - costs.net_saving,
        }
    }

    pub fn outcome(&self) -> SavingOutcome {
        SavingOutcome::of(self.effective_net_saving)
    }
}

fn percent_of(hundredths: i128) -> Won {
    Won(crate::levy::round_div(hundredths, 100))
}

/// Incentive for recognized heads above the quota. Never netted against the levy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcessIncentive {
    pub excess_headcount: u32,
    pub monthly_per_head: Won,
    pub annual: Won,
}

impl ExcessIncentive {
    pub(crate) fn build(excess_headcount: u32, monthly_per_head: Won) -> Self {
        Self {
            excess_headcount,
            monthly_per_head,
            annual: monthly_per_head.times(excess_headcount).annualized(),
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.excess_headcount > 0
    }
}

/// The same scenario priced under both contract lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractComparison {
    pub one_year: CostBreakdown,
    pub three_year: CostBreakdown,
}

impl ContractComparison {
    pub fn for_term(&self, term: ContractTerm) -> &CostBreakdown {
        match term {
            ContractTerm::OneYear => &self.one_year,
            ContractTerm::ThreeYear => &self.three_year,
        }
    }

    /// Annual saving from choosing the three-year contract.
    pub fn three_year_advantage(&self) -> Won {
        self.three_year.net_saving - self.one_year.net_saving
    }
}
