use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Quota credit granted per severely disabled employee.
pub const SEVERE_HEADCOUNT_WEIGHT: u32 = 2;

const BASIS_POINTS_PER_UNIT: u64 = 10_000;

/// Employer category that selects the statutory quota ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Private,
    Public,
}

impl Sector {
    pub const fn label(self) -> &'static str {
        match self {
            Sector::Private => "private",
            Sector::Public => "public",
        }
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Sector::Private),
            "public" => Ok(Sector::Public),
            other => Err(format!("unknown sector '{other}'")),
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a fractional mandatory count is turned into whole hires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    Floor,
    Ceil,
}

impl RoundingMode {
    fn divide(self, numerator: u64, denominator: u64) -> u64 {
        match self {
            RoundingMode::Floor => numerator / denominator,
            RoundingMode::Ceil => numerator.div_ceil(denominator),
        }
    }
}

/// Statutory quota ratio in basis points (310 = 3.1 %).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotaRatio(u32);

impl QuotaRatio {
    pub const fn from_basis_points(basis_points: u32) -> Self {
        Self(basis_points)
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    pub fn percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

/// Private-sector quota, identical in every context.
pub const PRIVATE_QUOTA: QuotaRatio = QuotaRatio::from_basis_points(310);
/// Public-sector quota used by the sales dataset.
pub const PUBLIC_QUOTA_SALES: QuotaRatio = QuotaRatio::from_basis_points(360);
/// Public-sector quota used by the calculator and manual entry.
pub const PUBLIC_QUOTA_POLICY: QuotaRatio = QuotaRatio::from_basis_points(380);

/// Ratio and rounding pair applied by one call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaRule {
    pub private: QuotaRatio,
    pub public: QuotaRatio,
    pub rounding: RoundingMode,
}

impl QuotaRule {
    pub const fn ratio_for(&self, sector: Sector) -> QuotaRatio {
        match sector {
            Sector::Private => self.private,
            Sector::Public => self.public,
        }
    }

    pub fn mandatory_count(&self, workforce: &WorkforceProfile) -> u32 {
        compute_mandatory_count(
            workforce.total_workers,
            self.ratio_for(workforce.sector),
            self.rounding,
        )
    }
}

/// Call sites that historically used different quota parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaContext {
    /// Pre-computed sales-targeting dataset.
    SalesDataset,
    /// Companies entered by hand into the registry.
    ManualEntry,
    /// Interactive levy calculator.
    Calculator,
}

impl QuotaContext {
    pub const fn label(self) -> &'static str {
        match self {
            QuotaContext::SalesDataset => "sales_dataset",
            QuotaContext::ManualEntry => "manual_entry",
            QuotaContext::Calculator => "calculator",
        }
    }
}

impl FromStr for QuotaContext {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sales_dataset" | "sales" | "dataset" => Ok(QuotaContext::SalesDataset),
            "manual_entry" | "manual" => Ok(QuotaContext::ManualEntry),
            "calculator" => Ok(QuotaContext::Calculator),
            other => Err(format!("unknown quota context '{other}'")),
        }
    }
}

/// Workforce size and sector of one company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkforceProfile {
    pub total_workers: u32,
    pub sector: Sector,
}

impl WorkforceProfile {
    pub const fn new(total_workers: u32, sector: Sector) -> Self {
        Self {
            total_workers,
            sector,
        }
    }
}

/// Disabled employees split by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringRecord {
    #[serde(default)]
    pub mild: u32,
    #[serde(default)]
    pub severe: u32,
}

impl HiringRecord {
    pub const fn new(mild: u32, severe: u32) -> Self {
        Self { mild, severe }
    }

    /// Record for datasets that do not split by severity.
    pub const fn unweighted(hired: u32) -> Self {
        Self::new(hired, 0)
    }

    pub fn headcount(&self) -> u32 {
        self.mild.saturating_add(self.severe)
    }

    pub fn recognized_headcount(&self) -> u32 {
        compute_recognized_headcount(self.mild, self.severe)
    }

    pub fn combined(&self, other: &HiringRecord) -> HiringRecord {
        HiringRecord {
            mild: self.mild.saturating_add(other.mild),
            severe: self.severe.saturating_add(other.severe),
        }
    }
}

pub fn compute_mandatory_count(total_workers: u32, ratio: QuotaRatio, rounding: RoundingMode) -> u32 {
    let scaled = u64::from(total_workers) * u64::from(ratio.basis_points());
    let count = rounding.divide(scaled, BASIS_POINTS_PER_UNIT);
    u32::try_from(count).unwrap_or(u32::MAX)
}

pub fn compute_recognized_headcount(mild: u32, severe: u32) -> u32 {
    mild.saturating_add(severe.saturating_mul(SEVERE_HEADCOUNT_WEIGHT))
}

pub fn compute_shortfall(recognized_headcount: u32, mandatory_count: u32) -> u32 {
    mandatory_count.saturating_sub(recognized_headcount)
}

/// Recognized headcount measured against the mandatory count.
///
/// Drives the penalty tier. Undefined when nothing is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRatio {
    recognized: u32,
    mandatory: u32,
}

impl ComplianceRatio {
    pub fn of(recognized_headcount: u32, mandatory_count: u32) -> Option<Self> {
        (mandatory_count > 0).then_some(Self {
            recognized: recognized_headcount,
            mandatory: mandatory_count,
        })
    }

    pub fn value(&self) -> f64 {
        f64::from(self.recognized) / f64::from(self.mandatory)
    }

    /// Exact `ratio < numerator / denominator`.
    pub fn is_below(&self, numerator: u32, denominator: u32) -> bool {
        u64::from(self.recognized) * u64::from(denominator)
            < u64::from(self.mandatory) * u64::from(numerator)
    }

    pub fn is_met(&self) -> bool {
        self.recognized >= self.mandatory
    }
}

/// Recognized headcount measured against the whole workforce, in basis points.
///
/// Drives public disclosure. Rounded to two decimals of a percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmploymentRate(u32);

impl EmploymentRate {
    pub const fn from_basis_points(basis_points: u32) -> Self {
        Self(basis_points)
    }

    pub fn of(recognized_headcount: u32, total_workers: u32) -> Option<Self> {
        if total_workers == 0 {
            return None;
        }
        let numerator = u64::from(recognized_headcount) * BASIS_POINTS_PER_UNIT * 2;
        let denominator = u64::from(total_workers) * 2;
        let rounded = (numerator + u64::from(total_workers)) / denominator;
        Some(Self(u32::try_from(rounded).unwrap_or(u32::MAX)))
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    pub fn percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for EmploymentRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandatory_count_respects_rounding_mode() {
        assert_eq!(compute_mandatory_count(200, PRIVATE_QUOTA, RoundingMode::Floor), 6);
        assert_eq!(compute_mandatory_count(200, PRIVATE_QUOTA, RoundingMode::Ceil), 7);
        assert_eq!(compute_mandatory_count(500, PRIVATE_QUOTA, RoundingMode::Ceil), 16);
        assert_eq!(compute_mandatory_count(500, PRIVATE_QUOTA, RoundingMode::Floor), 15);
        assert_eq!(compute_mandatory_count(1_000, PRIVATE_QUOTA, RoundingMode::Ceil), 31);
    }

    #[test]
    fn zero_workers_have_no_obligation() {
        for rounding in [RoundingMode::Floor, RoundingMode::Ceil] {
            assert_eq!(compute_mandatory_count(0, PUBLIC_QUOTA_POLICY, rounding), 0);
        }
    }

    #[test]
    fn severe_employees_count_double() {
        assert_eq!(compute_recognized_headcount(5, 3), 11);
        assert_eq!(HiringRecord::new(0, 4).recognized_headcount(), 8);
        assert_eq!(HiringRecord::new(7, 0).recognized_headcount(), 7);
    }

    #[test]
    fn shortfall_never_goes_negative() {
        assert_eq!(compute_shortfall(20, 16), 0);
        assert_eq!(compute_shortfall(10, 16), 6);
    }

    #[test]
    fn compliance_ratio_is_undefined_without_obligation() {
        assert!(ComplianceRatio::of(3, 0).is_none());
        let ratio = ComplianceRatio::of(10, 16).expect("defined");
        assert!((ratio.value() - 0.625).abs() < f64::EPSILON);
        assert!(ratio.is_below(3, 4));
        assert!(!ratio.is_below(1, 2));
    }

    #[test]
    fn employment_rate_uses_total_workforce() {
        let rate = EmploymentRate::of(28, 3_200).expect("workforce present");
        assert_eq!(rate.basis_points(), 88);
        assert_eq!(rate.to_string(), "0.88%");
        assert!(EmploymentRate::of(5, 0).is_none());
    }

    #[test]
    fn sector_and_context_parse_case_insensitively() {
        assert_eq!("Public".parse::<Sector>(), Ok(Sector::Public));
        assert_eq!(
            "manual-entry".parse::<QuotaContext>(),
            Ok(QuotaContext::ManualEntry)
        );
        assert!("charity".parse::<Sector>().is_err());
    }
}
