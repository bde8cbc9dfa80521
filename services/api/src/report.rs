use crate::infra::{build_registry, Registry};
use crate::routes::{assess, AssessRequest, AssessResponse};
use clap::Args;
use quota_levy::config::AppConfig;
use quota_levy::error::AppError;
use quota_levy::registry::{
    sales_targets, summarize, top_by_levy, CompanyQuery, CompanyRecord, InMemoryContactBook,
    RegistrySummary,
};
use quota_levy::{ComparisonResult, LevyPolicy, PriorityTier, QuotaContext, ScenarioRequest, Sector, ViewMode};
use std::fmt::Write as _;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Total full-time workforce
    #[arg(long, default_value_t = 200)]
    pub(crate) workers: i64,
    /// Employer sector (private or public)
    #[arg(long, default_value = "private")]
    pub(crate) sector: Sector,
    /// Mildly disabled employees
    #[arg(long, default_value_t = 0)]
    pub(crate) mild: i64,
    /// Severely disabled employees (counted twice)
    #[arg(long, default_value_t = 0)]
    pub(crate) severe: i64,
    /// Quota rule to apply (calculator, sales_dataset, manual_entry)
    #[arg(long, default_value = "calculator")]
    pub(crate) context: QuotaContext,
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Total full-time workforce
    #[arg(long, default_value_t = 200)]
    pub(crate) workers: i64,
    #[arg(long, default_value = "private")]
    pub(crate) sector: Sector,
    /// Mildly disabled employees today
    #[arg(long, default_value_t = 0)]
    pub(crate) current_mild: i64,
    /// Severely disabled employees today
    #[arg(long, default_value_t = 0)]
    pub(crate) current_severe: i64,
    /// Mildly disabled hires through the service
    #[arg(long, default_value_t = 0)]
    pub(crate) add_mild: i64,
    /// Severely disabled hires through the service
    #[arg(long, default_value_t = 0)]
    pub(crate) add_severe: i64,
    /// Contract length in years (1 or 3)
    #[arg(long, default_value_t = 1)]
    pub(crate) contract_years: u8,
    /// Daily hours per hire, clamped to 1..=8
    #[arg(long, default_value_t = 4.0)]
    pub(crate) hours: f64,
    /// Corporate tax rate, e.g. 0.22 or 22%
    #[arg(long, value_parser = crate::infra::parse_ratio, default_value = "0.2")]
    pub(crate) tax_rate: f64,
    /// Present figures per month or per year
    #[arg(long, default_value = "annual")]
    pub(crate) view: ViewMode,
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl CompareArgs {
    fn request(&self) -> ScenarioRequest {
        ScenarioRequest {
            total_workers: self.workers,
            sector: self.sector,
            current_mild: self.current_mild,
            current_severe: self.current_severe,
            additional_mild: self.add_mild,
            additional_severe: self.add_severe,
            contract_years: self.contract_years,
            hours_per_day: self.hours,
            tax_rate: self.tax_rate,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct CompanyListArgs {
    /// Only companies below their mandatory count
    #[arg(long)]
    pub(crate) deficit_only: bool,
    /// Only companies below the public-disclosure rate
    #[arg(long)]
    pub(crate) named_only: bool,
    /// Only companies in this priority tier (A, B or C)
    #[arg(long)]
    pub(crate) priority: Option<PriorityTier>,
    #[arg(long)]
    pub(crate) sector: Option<Sector>,
    #[arg(long)]
    pub(crate) industry: Option<String>,
    /// Region prefix such as 경북 or 서울
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// Name or industry search text
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long, default_value_t = 20)]
    pub(crate) limit: usize,
}

impl CompanyListArgs {
    fn query(&self) -> CompanyQuery {
        CompanyQuery {
            deficit_only: self.deficit_only,
            publicly_named_only: self.named_only,
            priority: self.priority,
            sector: self.sector,
            industry: self.industry.clone(),
            region: self.region.clone(),
            search: self.search.clone(),
            limit: Some(self.limit),
            ..CompanyQuery::default()
        }
    }
}

fn load_policy() -> Result<(AppConfig, LevyPolicy), AppError> {
    let config = AppConfig::load()?;
    let policy = config.levy.load_policy()?;
    Ok((config, policy))
}

fn load_registry() -> Result<Arc<Registry>, AppError> {
    let (config, policy) = load_policy()?;
    Ok(build_registry(&policy, &config.levy)?)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    Ok(json)
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let (_, policy) = load_policy()?;
    let response = assess(
        &policy,
        AssessRequest {
            total_workers: args.workers,
            sector: args.sector,
            mild: args.mild,
            severe: args.severe,
            context: args.context,
        },
    );

    if args.json {
        println!("{}", to_json(&response)?);
    } else {
        print!("{}", render_assessment(&response));
    }
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let (_, policy) = load_policy()?;
    let input = args.request().into_input()?;
    let result = quota_levy::CostComparator::new(&policy).compare(&input);

    if args.json {
        println!("{}", to_json(&result.view(args.view))?);
    } else {
        print!("{}", render_comparison(&result, args.view));
    }
    Ok(())
}

pub(crate) fn run_company_list(args: CompanyListArgs) -> Result<(), AppError> {
    let registry = load_registry()?;
    let companies = registry.query(&args.query())?;
    print!("{}", render_company_table(&companies));
    Ok(())
}

pub(crate) fn run_company_summary() -> Result<(), AppError> {
    let registry = load_registry()?;
    let records = registry.all()?;
    print!("{}", render_summary(&summarize(&records)));

    println!("\nLargest estimated levies");
    for record in top_by_levy(&records, 5) {
        println!(
            "  - {} ({}): {}",
            record.profile.name, record.profile.industry, record.estimated_annual_levy
        );
    }
    Ok(())
}

pub(crate) fn run_sales_targets(limit: usize) -> Result<(), AppError> {
    let registry = load_registry()?;
    let records = registry.all()?;
    let contacts = InMemoryContactBook::default();
    let targets = sales_targets(&records, &contacts);

    println!("Open sales targets ({} total)", targets.len());
    for target in targets.into_iter().take(limit) {
        let company = target.company;
        println!(
            "  - [{}] {} | gap {} | {} | {}",
            company.priority.map(|tier| tier.code()).unwrap_or("-"),
            company.profile.name,
            company.gap,
            company.estimated_annual_levy,
            target.contact_status.label()
        );
    }
    Ok(())
}

fn render_assessment(response: &AssessResponse) -> String {
    let assessment = &response.assessment;
    let mut out = String::new();
    let _ = writeln!(out, "Levy assessment ({} rule)", response.context.label());
    let _ = writeln!(
        out,
        "- Workforce: {} {} employees",
        response.workforce.total_workers, response.workforce.sector
    );
    let _ = writeln!(
        out,
        "- Mandatory {} | recognized {} | shortfall {}",
        assessment.mandatory_count, assessment.recognized_headcount, assessment.shortfall
    );
    let _ = writeln!(
        out,
        "- Tier: {} at {} per head per month",
        assessment.tier.label(),
        assessment.monthly_rate
    );
    let _ = writeln!(
        out,
        "- Levy: {} per month | {} per year",
        response.monthly_levy_display, response.annual_levy_display
    );
    if let Some(rate) = response.employment_rate {
        let named = if response.is_publicly_named {
            "subject to public naming"
        } else {
            "above the disclosure threshold"
        };
        let _ = writeln!(out, "- Employment rate {rate} ({named})");
    }
    out
}

fn render_comparison(result: &ComparisonResult, mode: ViewMode) -> String {
    let view = result.view(mode);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Hiring comparison ({}, {}, {} per day)",
        result.input.contract, view.period, result.input.hours_per_day.get()
    );
    let _ = writeln!(
        out,
        "- Mandatory {} | after hiring {} recognized ({}% fulfilled)",
        result.mandatory_count(),
        result.after.recognized_headcount,
        result.fulfilment_percent()
    );
    let _ = writeln!(
        out,
        "- Levy: {} → {} (saving {})",
        view.current_levy.display, view.after_levy.display, view.levy_saving.display
    );
    let _ = writeln!(
        out,
        "- Costs: service {} + wages {} = {}",
        view.service_cost.display, view.wage_cost.display, view.total_cost_after.display
    );
    let _ = writeln!(
        out,
        "- Net: {} ({})",
        view.net_saving.display,
        view.outcome.label()
    );
    let _ = writeln!(
        out,
        "- After {} tax: {} ({}), tax advantage {}",
        result.input.tax,
        view.effective_net_saving.display,
        view.effective_outcome.label(),
        view.tax_advantage.display
    );
    if result.incentive.excess_headcount > 0 {
        let _ = writeln!(
            out,
            "- Incentive for {} heads above quota: {}",
            result.incentive.excess_headcount, view.incentive.display
        );
    }
    let _ = writeln!(
        out,
        "- 1-year net {} | 3-year net {}",
        view.one_year_net_saving.display, view.three_year_net_saving.display
    );
    if result.disclosure_risk.resolved_after {
        let _ = writeln!(out, "- Hiring lifts the company out of disclosure risk");
    }
    out
}

fn render_company_table(companies: &[CompanyRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} companies", companies.len());
    for record in companies {
        let rate = record
            .employment_rate
            .map(|rate| rate.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  - [{}] {} | {} | {} | {}/{} hired | gap {} | {} | {}",
            record.priority.map(|tier| tier.code()).unwrap_or("-"),
            record.profile.name,
            record.profile.industry,
            record.profile.region,
            record.profile.hired_count,
            record.required_count,
            record.gap,
            rate,
            record.estimated_annual_levy
        );
    }
    out
}

fn render_summary(summary: &RegistrySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} companies ({} manual) | {} in deficit ({:.1}%) | {} publicly named",
        summary.total_companies,
        summary.manual_companies,
        summary.deficit_companies,
        summary.deficit_share,
        summary.publicly_named
    );
    let _ = writeln!(
        out,
        "Total shortfall {} | estimated levy {}",
        summary.total_gap, summary.total_estimated_levy
    );
    for (tier, breakdown) in &summary.by_priority {
        let _ = writeln!(
            out,
            "  - {} {}: {} companies | gap {} | {}",
            tier.code(),
            tier.label(),
            breakdown.companies,
            breakdown.total_gap,
            breakdown.total_levy
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quota_levy::registry::{CompanyRegistry, InMemoryManualCompanyStore};

    #[test]
    fn assessment_text_mentions_shortfall_and_naming() {
        let policy = LevyPolicy::vintage_2025();
        let response = assess(
            &policy,
            AssessRequest {
                total_workers: 200,
                sector: Sector::Private,
                mild: 0,
                severe: 0,
                context: QuotaContext::Calculator,
            },
        );
        let text = render_assessment(&response);
        assert!(text.contains("shortfall 6"));
        assert!(text.contains("1.5억원 per year"));
        assert!(text.contains("subject to public naming"));
    }

    #[test]
    fn comparison_text_uses_requested_period() {
        let policy = LevyPolicy::vintage_2025();
        let request = ScenarioRequest {
            additional_mild: 3,
            ..ScenarioRequest::default()
        };
        let input = request.into_input().expect("valid scenario");
        let result = quota_levy::CostComparator::new(&policy).compare(&input);

        let monthly = render_comparison(&result, ViewMode::Monthly);
        assert!(monthly.contains("monthly"));
        assert!(monthly.contains("50% fulfilled"));
        assert!(!monthly.contains("Incentive"));
    }

    #[test]
    fn list_args_translate_into_registry_query() {
        let args = CompanyListArgs {
            deficit_only: true,
            region: Some("경북".to_string()),
            limit: 2,
            ..CompanyListArgs::default()
        };
        let policy = LevyPolicy::vintage_2025();
        let registry = CompanyRegistry::new(&policy, Arc::new(InMemoryManualCompanyStore::default()))
            .expect("bundled dataset loads");

        let companies = registry.query(&args.query()).expect("query runs");
        assert_eq!(companies.len(), 2);
        assert!(companies.iter().all(|record| record.has_deficit()));

        let table = render_company_table(&companies);
        assert!(table.starts_with("2 companies"));
    }

    #[test]
    fn summary_text_lists_every_priority_tier() {
        let policy = LevyPolicy::vintage_2025();
        let registry = CompanyRegistry::new(&policy, Arc::new(InMemoryManualCompanyStore::default()))
            .expect("bundled dataset loads");
        let summary = summarize(&registry.all().expect("records"));

        let text = render_summary(&summary);
        assert!(text.starts_with("190 companies (0 manual) | 179 in deficit"));
        assert!(text.contains("  - A "));
        assert!(text.contains("  - C "));
    }

    #[test]
    fn json_output_propagates_serialization_errors() {
        let mut keyed = std::collections::BTreeMap::new();
        keyed.insert((1u8, 2u8), "tuple keys are not valid JSON object keys");
        assert!(matches!(to_json(&keyed), Err(AppError::Io(_))));

        let policy = LevyPolicy::vintage_2025();
        let response = assess(
            &policy,
            AssessRequest {
                total_workers: 200,
                sector: Sector::Private,
                mild: 0,
                severe: 0,
                context: QuotaContext::Calculator,
            },
        );
        let json = to_json(&response).expect("assessment serializes");
        assert!(json.contains("\"mandatory_count\": 6"));
    }
}
