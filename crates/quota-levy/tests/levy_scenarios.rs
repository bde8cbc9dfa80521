//! End-to-end levy scenarios driven through the public engine and comparator.
//!
//! Figures are the published 2025 rate table applied to fixed workforces, so a
//! rate or rounding regression shows up as a concrete won amount.

use quota_levy::comparator::{SavingOutcome, TaxBracket};
use quota_levy::levy::ContractTerm;
use quota_levy::{
    CostComparator, HiringRecord, LevyPolicy, PenaltyTier, QuotaContext, QuotaEngine,
    ScenarioRequest, Sector, ViewMode, Won, WorkforceProfile,
};

mod common {
    use super::*;

    pub(super) fn policy() -> LevyPolicy {
        let raw = include_str!("../data/policy_2025.json");
        LevyPolicy::from_reader(raw.as_bytes()).expect("shipped policy loads")
    }

    pub(super) fn engine(context: QuotaContext) -> QuotaEngine {
        QuotaEngine::for_context(&policy(), context)
    }
}

#[test]
fn calculator_floors_the_quota_for_a_small_private_company() {
    let workforce = WorkforceProfile::new(200, Sector::Private);
    let assessment = common::engine(QuotaContext::Calculator).assess(&workforce, 0);

    assert_eq!(assessment.mandatory_count, 6);
    assert_eq!(assessment.tier, PenaltyTier::Zero);
    assert_eq!(assessment.monthly_levy, Won(12_577_620));
    assert_eq!(assessment.annual_levy, Won(12_577_620 * 12));
}

#[test]
fn manual_entry_ceils_the_quota_for_the_same_company() {
    let workforce = WorkforceProfile::new(200, Sector::Private);
    let assessment = common::engine(QuotaContext::ManualEntry).assess(&workforce, 0);

    assert_eq!(assessment.mandatory_count, 7);
    assert_eq!(assessment.monthly_levy, Won(14_673_890));
}

#[test]
fn mid_sized_company_with_ten_mild_hires() {
    let workforce = WorkforceProfile::new(500, Sector::Private);
    let assessment = common::engine(QuotaContext::SalesDataset)
        .assess_hiring(&workforce, &HiringRecord::new(10, 0));

    assert_eq!(assessment.mandatory_count, 16);
    assert_eq!(assessment.tier, PenaltyTier::Below75);
    assert_eq!(assessment.monthly_rate, Won(1_333_480));
    assert_eq!(assessment.annual_levy, Won(96_010_560));
}

#[test]
fn calculator_form_round_trip() {
    let request: ScenarioRequest = serde_json::from_value(serde_json::json!({
        "total_workers": 500,
        "sector": "private",
        "current_mild": 10,
        "current_severe": -2,
        "additional_mild": 2,
        "additional_severe": 2,
        "contract_years": 3,
        "hours_per_day": 10,
        "tax_rate": 0.22
    }))
    .expect("form parses");
    let input = request.into_input().expect("form is valid");

    assert_eq!(input.current, HiringRecord::new(10, 0));
    assert_eq!(input.hours_per_day.get(), 8.0);
    assert_eq!(input.tax, TaxBracket::TwentyTwo);
    assert_eq!(input.contract, ContractTerm::ThreeYear);

    let result = CostComparator::new(&common::policy()).compare(&input);
    // Floor of 15.5 under the calculator rule.
    assert_eq!(result.mandatory_count(), 15);
    assert_eq!(result.current.recognized_headcount, 10);
    assert_eq!(result.after.recognized_headcount, 16);
    assert_eq!(result.after.tier, PenaltyTier::Achieved);
    assert_eq!(result.additional_headcount, 4);
    assert_eq!(result.incentive.excess_headcount, 1);

    // 5 short at 10/15, below three quarters.
    assert_eq!(result.current.annual_levy, Won(5 * 1_333_480 * 12));
    assert_eq!(result.levy_saving, result.current.annual_levy);
    assert_eq!(result.costs.service_cost, Won(4 * 370_000 * 12));
    assert_eq!(result.costs.wage_cost, Won(4 * 1_816_320 * 12));
    assert_eq!(result.costs.outcome(), SavingOutcome::NetCost);
    assert!(result.tax.effective_net_saving > result.costs.net_saving);
}

#[test]
fn monthly_and_annual_views_share_stored_figures() {
    let input = ScenarioRequest {
        additional_mild: 3,
        ..ScenarioRequest::default()
    }
    .into_input()
    .expect("valid");
    let result = CostComparator::new(&common::policy()).compare(&input);

    let annual = result.view(ViewMode::Annual);
    let monthly = result.view(ViewMode::Monthly);
    assert_eq!(annual.current_levy.amount, result.current.annual_levy);
    assert_eq!(monthly.current_levy.amount.annualized(), result.current.annual_levy);
    assert_eq!(result.view(ViewMode::Monthly), monthly);
}
