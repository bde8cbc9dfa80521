use proptest::prelude::*;

use super::*;
use crate::levy::{HiringRecord, PenaltyTier, Sector, WorkforceProfile};

fn comparator() -> CostComparator {
    CostComparator::new(&LevyPolicy::vintage_2025())
}

fn three_mild_hires() -> ScenarioInput {
    ScenarioInput {
        additional: HiringRecord::new(3, 0),
        ..ScenarioInput::default()
    }
}

#[test]
fn default_company_adding_three_hires() {
    let result = comparator().compare(&three_mild_hires());

    assert_eq!(result.mandatory_count(), 6);
    assert_eq!(result.current.tier, PenaltyTier::Zero);
    assert_eq!(result.current.annual_levy, Won(150_931_440));
    assert_eq!(result.after.tier, PenaltyTier::Below75);
    assert_eq!(result.after.annual_levy, Won(48_005_280));
    assert_eq!(result.levy_saving, Won(102_926_160));
    assert_eq!(result.monthly_wage_per_hire, Won(908_160));
    assert_eq!(result.costs.service_cost, Won(18_000_000));
    assert_eq!(result.costs.wage_cost, Won(32_693_760));
    assert_eq!(result.costs.total_cost_after, Won(98_699_040));
    assert_eq!(result.costs.net_saving, Won(52_232_400));
    assert_eq!(result.costs.outcome(), SavingOutcome::NetSaving);
    assert_eq!(result.fulfilment_percent(), 50);
}

#[test]
fn tax_adjustment_favours_hiring() {
    let result = comparator().compare(&three_mild_hires());

    assert_eq!(result.tax.bracket, TaxBracket::Twenty);
    assert_eq!(result.tax.current_effective_levy, Won(181_117_728));
    assert_eq!(result.tax.effective_net_saving, Won(82_956_384));
    assert_eq!(result.tax.tax_advantage, Won(30_723_984));
}

#[test]
fn contract_lengths_are_priced_side_by_side() {
    let result = comparator().compare(&three_mild_hires());

    assert_eq!(result.contracts.one_year, result.costs);
    assert_eq!(result.contracts.three_year.service_cost, Won(13_320_000));
    assert_eq!(result.contracts.three_year.net_saving, Won(56_912_400));
    assert_eq!(result.contracts.three_year_advantage(), Won(4_680_000));

    let three_year = comparator().compare(&ScenarioInput {
        contract: ContractTerm::ThreeYear,
        ..three_mild_hires()
    });
    assert_eq!(three_year.costs, result.contracts.three_year);
}

#[test]
fn disclosure_risk_clears_at_half_the_quota() {
    let result = comparator().compare(&three_mild_hires());
    assert!(result.disclosure_risk.current_at_risk);
    assert!(result.disclosure_risk.resolved_after);

    let untouched = comparator().compare(&ScenarioInput::default());
    assert!(untouched.disclosure_risk.current_at_risk);
    assert!(!untouched.disclosure_risk.resolved_after);
}

#[test]
fn severe_hires_beyond_quota_earn_incentive() {
    let input = ScenarioInput {
        additional: HiringRecord::new(0, 4),
        ..ScenarioInput::default()
    };
    let result = comparator().compare(&input);

    assert_eq!(result.after.recognized_headcount, 8);
    assert_eq!(result.after.tier, PenaltyTier::Achieved);
    assert_eq!(result.additional_headcount, 4);
    assert_eq!(result.levy_saving, Won(150_931_440));
    assert_eq!(result.incentive.excess_headcount, 2);
    assert_eq!(result.incentive.annual, Won(16_200_000));
    // The incentive is reported beside the net saving, not inside it.
    assert_eq!(
        result.costs.net_saving,
        result.current.annual_levy - result.costs.total_cost_after
    );
    assert_eq!(result.fulfilment_percent(), 100);
}

#[test]
fn full_time_hire_can_cost_more_than_the_levy() {
    let input = ScenarioInput {
        workforce: WorkforceProfile::new(40, Sector::Private),
        additional: HiringRecord::new(1, 0),
        hours_per_day: HoursPerDay::new(8.0),
        tax: TaxBracket::Ten,
        ..ScenarioInput::default()
    };
    let result = comparator().compare(&input);

    assert_eq!(result.current.annual_levy, Won(25_155_240));
    assert_eq!(result.costs.net_saving, Won(-2_640_600));
    assert_eq!(result.costs.outcome(), SavingOutcome::NetCost);
    assert_eq!(result.tax.effective_net_saving, Won(2_654_508));
    assert_eq!(result.tax.outcome(), SavingOutcome::NetSaving);
}

#[test]
fn no_additional_hiring_breaks_even() {
    let result = comparator().compare(&ScenarioInput::default());
    assert_eq!(result.levy_saving, Won::ZERO);
    assert_eq!(result.costs.net_saving, Won::ZERO);
    assert_eq!(result.costs.outcome(), SavingOutcome::BreakEven);
    assert_eq!(result.incentive.annual, Won::ZERO);
}

#[test]
fn monthly_view_divides_without_touching_stored_figures() {
    let result = comparator().compare(&three_mild_hires());
    let monthly = result.view(ViewMode::Monthly);
    let annual = result.view(ViewMode::Annual);

    assert_eq!(monthly.period, "monthly");
    assert_eq!(monthly.current_levy.amount, Won(12_577_620));
    assert_eq!(monthly.current_levy.display, "1,258만원");
    assert_eq!(monthly.net_saving.amount, Won(4_352_700));
    assert_eq!(annual.current_levy.amount, result.current.annual_levy);
    assert_eq!(annual.current_levy.display, "1.5억원");
    assert_eq!(result.current.annual_levy, Won(150_931_440));
}

#[test]
fn empty_workforce_compares_to_nothing() {
    let input = ScenarioInput {
        workforce: WorkforceProfile::new(0, Sector::Public),
        current: HiringRecord::new(2, 1),
        ..ScenarioInput::default()
    };
    let result = comparator().compare(&input);
    assert_eq!(result.current.tier, PenaltyTier::Achieved);
    assert_eq!(result.current.annual_levy, Won::ZERO);
    assert!(!result.disclosure_risk.current_at_risk);
}

fn bracket() -> impl Strategy<Value = TaxBracket> {
    prop_oneof![
        Just(TaxBracket::Ten),
        Just(TaxBracket::Twenty),
        Just(TaxBracket::TwentyTwo),
        Just(TaxBracket::TwentyFive),
    ]
}

proptest! {
    #[test]
    fn tax_adjusted_saving_beats_nominal_when_levy_falls(
        total in 1u32..5_000,
        current_mild in 0u32..40,
        current_severe in 0u32..20,
        additional_mild in 0u32..40,
        additional_severe in 0u32..20,
        hours in 1.0f64..8.0,
        three_year in any::<bool>(),
        public in any::<bool>(),
        tax in bracket(),
    ) {
        let input = ScenarioInput {
            workforce: WorkforceProfile::new(total, if public { Sector::Public } else { Sector::Private }),
            current: HiringRecord::new(current_mild, current_severe),
            additional: HiringRecord::new(additional_mild, additional_severe),
            contract: if three_year { ContractTerm::ThreeYear } else { ContractTerm::OneYear },
            hours_per_day: HoursPerDay::new(hours),
            tax,
        };
        let result = comparator().compare(&input);

        prop_assert_eq!(result.levy_saving, result.current.annual_levy - result.after.annual_levy);
        prop_assert!(result.levy_saving >= Won::ZERO);
        if result.levy_saving > Won::ZERO {
            prop_assert!(result.tax.effective_net_saving > result.costs.net_saving);
        }
        prop_assert!(result.tax.effective_net_saving >= result.costs.net_saving);
    }
}
