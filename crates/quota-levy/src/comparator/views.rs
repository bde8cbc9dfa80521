use serde::Serialize;

use crate::levy::{PenaltyTier, ViewMode, Won};

use super::costs::SavingOutcome;
use super::ComparisonResult;

/// A single currency line in the chosen period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountView {
    pub amount: Won,
    pub display: String,
}

impl AmountView {
    fn present(mode: ViewMode, annual: Won) -> Self {
        let amount = mode.present(annual);
        Self {
            amount,
            display: amount.to_string(),
        }
    }
}

/// Presentation of a [`ComparisonResult`]. Built on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonView {
    pub mode: ViewMode,
    pub period: &'static str,
    pub current_tier: PenaltyTier,
    pub after_tier: PenaltyTier,
    pub current_levy: AmountView,
    pub after_levy: AmountView,
    pub levy_saving: AmountView,
    pub service_cost: AmountView,
    pub wage_cost: AmountView,
    pub total_cost_after: AmountView,
    pub net_saving: AmountView,
    pub outcome: SavingOutcome,
    pub effective_net_saving: AmountView,
    pub effective_outcome: SavingOutcome,
    pub tax_advantage: AmountView,
    pub incentive: AmountView,
    pub one_year_net_saving: AmountView,
    pub three_year_net_saving: AmountView,
}

impl ComparisonView {
    pub fn new(result: &ComparisonResult, mode: ViewMode) -> Self {
        let line = |annual: Won| AmountView::present(mode, annual);

        Self {
            mode,
            period: mode.label(),
            current_tier: result.current.tier,
            after_tier: result.after.tier,
            current_levy: line(result.current.annual_levy),
            after_levy: line(result.after.annual_levy),
            levy_saving: line(result.levy_saving),
            service_cost: line(result.costs.service_cost),
            wage_cost: line(result.costs.wage_cost),
            total_cost_after: line(result.costs.total_cost_after),
            net_saving: line(result.costs.net_saving),
            outcome: result.costs.outcome(),
            effective_net_saving: line(result.tax.effective_net_saving),
            effective_outcome: result.tax.outcome(),
            tax_advantage: line(result.tax.tax_advantage),
            incentive: line(result.incentive.annual),
            one_year_net_saving: line(result.contracts.one_year.net_saving),
            three_year_net_saving: line(result.contracts.three_year.net_saving),
        }
    }
}
