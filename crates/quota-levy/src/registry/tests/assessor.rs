use super::common::*;
use crate::levy::{EmploymentRate, PenaltyTier, Sector, Won};
use crate::priority::PriorityTier;
use crate::registry::domain::{CompanyId, CompanyOrigin, CompanyProfile};
use crate::registry::CompanyAssessor;

fn profile(id: u64, sector: Sector, total_workers: u32, hired_count: u32) -> CompanyProfile {
    CompanyProfile {
        id: CompanyId(id),
        name: format!("company-{id}"),
        industry: "제조업".to_string(),
        industry_code: "기계".to_string(),
        region: "경북 포항시".to_string(),
        sector,
        total_workers,
        hired_count,
        contact: None,
    }
}

#[test]
fn dataset_rows_use_the_ceiling_quota() {
    let assessor = CompanyAssessor::new(&policy());
    let record = assessor.assess_dataset(profile(1, Sector::Private, 3_200, 28));

    assert_eq!(record.origin, CompanyOrigin::Dataset);
    assert_eq!(record.required_count, 100);
    assert_eq!(record.gap, 72);
    assert_eq!(record.tier, PenaltyTier::Below50);
    assert_eq!(record.estimated_annual_levy, Won(1_304_294_400));
    assert_eq!(record.estimated_levy_manwon(), 130_429);
    assert_eq!(record.employment_rate, Some(EmploymentRate::from_basis_points(88)));
    assert!(record.is_publicly_named);
    assert_eq!(record.priority, Some(PriorityTier::A));
}

#[test]
fn public_quota_differs_between_dataset_and_manual_entry() {
    let assessor = CompanyAssessor::new(&policy());
    let dataset = assessor.assess_dataset(profile(59, Sector::Public, 6_200, 218));
    assert_eq!(dataset.required_count, 224);
    assert_eq!(dataset.gap, 6);
    assert_eq!(dataset.tier, PenaltyTier::Above75);
    assert_eq!(dataset.estimated_annual_levy, Won(90_576_000));
    assert_eq!(dataset.priority, Some(PriorityTier::B));
    assert!(!dataset.is_publicly_named);

    let manual = assessor.assess_manual(
        public_input()
            .into_manual(CompanyId(9), fixed_now())
            .expect("valid input"),
    );
    assert_eq!(manual.origin, CompanyOrigin::Manual);
    assert_eq!(manual.required_count, 19);
    assert_eq!(manual.gap, 15);
    assert_eq!(manual.tier, PenaltyTier::Below25);
    assert_eq!(manual.estimated_annual_levy, Won(317_016_000));
    assert_eq!(manual.priority, Some(PriorityTier::A));
}

#[test]
fn override_replaces_computed_priority() {
    let assessor = CompanyAssessor::new(&policy());
    let mut input = small_private_input();
    input.priority_override = Some(PriorityTier::A);
    let record = assessor.assess_manual(input.into_manual(CompanyId(10), fixed_now()).expect("valid"));

    assert_eq!(record.gap, 2);
    assert_eq!(record.computed_priority, Some(PriorityTier::C));
    assert_eq!(record.priority, Some(PriorityTier::A));
}

#[test]
fn override_shows_through_on_compliant_company() {
    let assessor = CompanyAssessor::new(&policy());
    let record = assessor.assess_manual(
        compliant_input(Some(PriorityTier::B))
            .into_manual(CompanyId(11), fixed_now())
            .expect("valid"),
    );

    assert_eq!(record.gap, 0);
    assert_eq!(record.tier, PenaltyTier::Achieved);
    assert_eq!(record.estimated_annual_levy, Won::ZERO);
    assert_eq!(record.computed_priority, None);
    assert_eq!(record.priority, Some(PriorityTier::B));
}

#[test]
fn compliant_company_without_override_has_no_priority() {
    let assessor = CompanyAssessor::new(&policy());
    let record = assessor.assess_manual(
        compliant_input(None)
            .into_manual(CompanyId(12), fixed_now())
            .expect("valid"),
    );
    assert_eq!(record.priority, None);
}

#[test]
fn zero_hires_with_small_gap_is_tier_a() {
    let assessor = CompanyAssessor::new(&policy());
    let record = assessor.assess_dataset(profile(5, Sector::Private, 60, 0));
    assert_eq!(record.required_count, 2);
    assert_eq!(record.tier, PenaltyTier::Zero);
    assert_eq!(record.priority, Some(PriorityTier::A));
}

#[test]
fn disclosure_compares_the_unrounded_rate() {
    let assessor = CompanyAssessor::new(&policy());
    let record = assessor.assess_dataset(profile(6, Sector::Private, 20_000, 309));

    assert_eq!(record.employment_rate, Some(EmploymentRate::from_basis_points(155)));
    assert!(record.is_publicly_named);
}
