use std::collections::BTreeMap;

use super::common::*;
use crate::levy::{Sector, Won};
use crate::priority::PriorityTier;
use crate::registry::domain::{CompanyId, ContactRecord, ContactStatus};
use crate::registry::{
    industries, industry_deficits, regions, sales_targets, summarize, top_by_levy, CompanyQuery,
    InMemoryContactBook, SortDirection, SortKey,
};

#[test]
fn dataset_summary_matches_published_totals() {
    let (registry, _) = build_registry();
    let summary = summarize(registry.dataset());

    assert_eq!(summary.total_companies, 190);
    assert_eq!(summary.manual_companies, 0);
    assert_eq!(summary.deficit_companies, 179);
    assert_eq!(summary.total_gap, 18_416);
    assert_eq!(summary.total_estimated_levy, Won(354_381_254_040));
    assert_eq!(summary.publicly_named, 144);
    assert!((summary.deficit_share - 179.0 / 190.0 * 100.0).abs() < 1e-9);

    let a = summary.by_priority[&PriorityTier::A];
    assert_eq!((a.companies, a.total_gap), (167, 18_363));
    assert_eq!(a.total_levy, Won(353_581_166_040));
    let b = summary.by_priority[&PriorityTier::B];
    assert_eq!((b.companies, b.total_gap, b.total_levy), (3, 29, Won(437_784_000)));
    let c = summary.by_priority[&PriorityTier::C];
    assert_eq!((c.companies, c.total_gap, c.total_levy), (9, 24, Won(362_304_000)));
}

#[test]
fn empty_slice_summarises_to_zero() {
    let summary = summarize(&[]);
    assert_eq!(summary.total_companies, 0);
    assert_eq!(summary.deficit_share, 0.0);
    assert_eq!(summary.by_priority.len(), 3);
    assert_eq!(summary.total_estimated_levy, Won::ZERO);
}

#[test]
fn top_by_levy_orders_deficit_companies() {
    let (registry, _) = build_registry();
    let top = top_by_levy(registry.dataset(), 3);
    let ids: Vec<CompanyId> = top.iter().map(|record| record.id()).collect();
    assert_eq!(ids, vec![CompanyId(24), CompanyId(37), CompanyId(71)]);
    assert_eq!(top[0].estimated_annual_levy, Won(10_419_259_200));
    assert_eq!(top_by_levy(registry.dataset(), 10).len(), 10);
}

#[test]
fn industry_breakdown_leads_with_largest_gap() {
    let (registry, _) = build_registry();
    let deficits = industry_deficits(registry.dataset());
    assert_eq!(deficits[0].industry, "제조업");
    assert_eq!(deficits[0].companies, 45);
    assert_eq!(deficits[0].total_gap, 5_416);
    assert!(deficits
        .windows(2)
        .all(|pair| pair[0].total_gap >= pair[1].total_gap));
    assert_eq!(
        deficits.iter().map(|deficit| deficit.companies).sum::<usize>(),
        179
    );
}

#[test]
fn distinct_industries_and_region_prefixes() {
    let (registry, _) = build_registry();
    let industries = industries(registry.dataset());
    assert_eq!(industries.len(), 12);
    assert_eq!(industries.first().map(String::as_str), Some("IT/소프트웨어"));

    let regions = regions(registry.dataset());
    assert_eq!(regions.len(), 14);
    assert_eq!(regions.first().map(String::as_str), Some("강원"));
    assert!(regions.iter().any(|region| region == "서울"));
}

#[test]
fn query_filters_combine() {
    let (registry, _) = build_registry();
    let records = registry.dataset();

    let gyeongbuk = CompanyQuery {
        region: Some("경북".to_string()),
        ..CompanyQuery::default()
    };
    assert_eq!(gyeongbuk.apply(records).len(), 4);

    let gyeongbuk_deficit = CompanyQuery {
        deficit_only: true,
        ..gyeongbuk.clone()
    };
    assert_eq!(gyeongbuk_deficit.apply(records).len(), 3);

    let tier_b = CompanyQuery {
        priority: Some(PriorityTier::B),
        ..CompanyQuery::default()
    };
    let matched = tier_b.apply(records);
    assert_eq!(matched.len(), 3);
    assert!(matched.iter().all(|record| record.profile.sector == Sector::Public));

    let named = CompanyQuery {
        publicly_named_only: true,
        ..CompanyQuery::default()
    };
    assert_eq!(named.apply(records).len(), 144);
}

#[test]
fn query_sorts_and_limits() {
    let (registry, _) = build_registry();
    let query = CompanyQuery {
        deficit_only: true,
        sort: SortKey::EstimatedLevy,
        direction: SortDirection::Desc,
        limit: Some(2),
        ..CompanyQuery::default()
    };
    let matched = query.apply(registry.dataset());
    assert_eq!(matched.len(), 2);
    assert_eq!(matched[0].id(), CompanyId(24));

    let ascending = CompanyQuery {
        sort: SortKey::Gap,
        direction: SortDirection::Asc,
        ..CompanyQuery::default()
    };
    let matched = ascending.apply(registry.dataset());
    assert_eq!(matched[0].gap, 0);
}

#[test]
fn search_matches_name_case_insensitively() {
    let (registry, _) = build_registry();
    registry
        .add_manual_at(small_private_input(), fixed_now())
        .expect("stored");
    let records = registry.all().expect("all loads");

    let query = CompanyQuery {
        search: Some("acme".to_string()),
        ..CompanyQuery::default()
    };
    let matched = query.apply(&records);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].profile.name, "Acme Robotics");
}

#[test]
fn sales_targets_skip_closed_contacts() {
    let (registry, _) = build_registry();
    let records = registry.dataset();

    let book = InMemoryContactBook::default();
    book.save(ContactRecord {
        company_id: CompanyId(24),
        contact_name: "김담당".to_string(),
        department: "인사팀".to_string(),
        email: String::new(),
        phone: String::new(),
        status: ContactStatus::Contracted,
        memo: "3-year contract signed".to_string(),
        updated_at: fixed_now(),
    })
    .expect("saved");
    book.save(ContactRecord {
        company_id: CompanyId(1),
        contact_name: "이담당".to_string(),
        department: "HR팀".to_string(),
        email: String::new(),
        phone: String::new(),
        status: ContactStatus::Meeting,
        memo: String::new(),
        updated_at: fixed_now(),
    })
    .expect("saved");

    let targets = sales_targets(records, &book);
    assert_eq!(targets.len(), 178);
    assert!(targets.iter().all(|target| target.company.id() != CompanyId(24)));
    let first = targets.iter().find(|target| target.company.id() == CompanyId(1));
    assert_eq!(first.map(|target| target.contact_status), Some(ContactStatus::Meeting));
    assert_eq!(targets[0].company.priority, Some(PriorityTier::A));
    assert_eq!(
        targets.last().and_then(|target| target.company.priority),
        Some(PriorityTier::C)
    );

    let empty: BTreeMap<CompanyId, ContactRecord> = BTreeMap::new();
    assert_eq!(sales_targets(records, &empty).len(), 179);
}

#[test]
fn overridden_compliant_company_is_not_a_sales_target() {
    let (registry, _) = build_registry();
    let added = registry
        .add_manual_at(compliant_input(Some(PriorityTier::B)), fixed_now())
        .expect("stored");
    assert_eq!(added.priority, Some(PriorityTier::B));

    let records = registry.all().expect("all loads");
    let empty: BTreeMap<CompanyId, ContactRecord> = BTreeMap::new();
    let targets = sales_targets(&records, &empty);
    assert_eq!(targets.len(), 179);
    assert!(targets.iter().all(|target| target.company.id() != added.id()));

    let summary = summarize(&records);
    assert_eq!(summary.manual_companies, 1);
    assert_eq!(summary.by_priority[&PriorityTier::B].companies, 3);

    let query = CompanyQuery {
        priority: Some(PriorityTier::B),
        ..CompanyQuery::default()
    };
    assert!(query.apply(&records).iter().any(|record| record.id() == added.id()));
}
