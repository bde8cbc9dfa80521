use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::{clamp_count, InvalidInput};
use crate::levy::{ContractTerm, HiringRecord, Sector, WorkforceProfile};

const MIN_HOURS: f64 = 1.0;
const MAX_HOURS: f64 = 8.0;
const DEFAULT_HOURS: f64 = 4.0;

/// Daily working hours of each additional hire, kept within one to eight.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct HoursPerDay(f64);

impl HoursPerDay {
    /// Non-finite input falls back to the four-hour default.
    pub fn new(hours: f64) -> Self {
        if !hours.is_finite() {
            return Self::default();
        }
        Self(hours.clamp(MIN_HOURS, MAX_HOURS))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for HoursPerDay {
    fn default() -> Self {
        Self(DEFAULT_HOURS)
    }
}

impl From<f64> for HoursPerDay {
    fn from(hours: f64) -> Self {
        Self::new(hours)
    }
}

impl From<HoursPerDay> for f64 {
    fn from(hours: HoursPerDay) -> Self {
        hours.0
    }
}

/// Corporate tax brackets offered by the calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum TaxBracket {
    Ten,
    #[default]
    Twenty,
    TwentyTwo,
    TwentyFive,
}

impl TaxBracket {
    pub const fn percent(self) -> i64 {
        match self {
            TaxBracket::Ten => 10,
            TaxBracket::Twenty => 20,
            TaxBracket::TwentyTwo => 22,
            TaxBracket::TwentyFive => 25,
        }
    }

    pub fn rate(self) -> f64 {
        self.percent() as f64 / 100.0
    }
}

impl TryFrom<f64> for TaxBracket {
    type Error = InvalidInput;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        let percent = (rate * 100.0).round();
        if !rate.is_finite() || (rate * 100.0 - percent).abs() > 1e-6 {
            return Err(InvalidInput::UnsupportedTaxRate(rate));
        }
        match percent as i64 {
            10 => Ok(TaxBracket::Ten),
            20 => Ok(TaxBracket::Twenty),
            22 => Ok(TaxBracket::TwentyTwo),
            25 => Ok(TaxBracket::TwentyFive),
            _ => Err(InvalidInput::UnsupportedTaxRate(rate)),
        }
    }
}

impl From<TaxBracket> for f64 {
    fn from(bracket: TaxBracket) -> Self {
        bracket.rate()
    }
}

impl fmt::Display for TaxBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Validated calculator scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub workforce: WorkforceProfile,
    pub current: HiringRecord,
    pub additional: HiringRecord,
    pub contract: ContractTerm,
    pub hours_per_day: HoursPerDay,
    pub tax: TaxBracket,
}

impl ScenarioInput {
    pub fn combined_hiring(&self) -> HiringRecord {
        self.current.combined(&self.additional)
    }

    /// Additional hires as people, not quota credit. Each one is paid and serviced.
    pub fn additional_headcount(&self) -> u32 {
        self.additional.headcount()
    }
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            workforce: WorkforceProfile::new(200, Sector::Private),
            current: HiringRecord::default(),
            additional: HiringRecord::default(),
            contract: ContractTerm::OneYear,
            hours_per_day: HoursPerDay::default(),
            tax: TaxBracket::default(),
        }
    }
}

/// Raw calculator form as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioRequest {
    pub total_workers: i64,
    pub sector: Sector,
    pub current_mild: i64,
    pub current_severe: i64,
    pub additional_mild: i64,
    pub additional_severe: i64,
    pub contract_years: u8,
    pub hours_per_day: f64,
    pub tax_rate: f64,
}

impl Default for ScenarioRequest {
    fn default() -> Self {
        Self {
            total_workers: 200,
            sector: Sector::Private,
            current_mild: 0,
            current_severe: 0,
            additional_mild: 0,
            additional_severe: 0,
            contract_years: 1,
            hours_per_day: DEFAULT_HOURS,
            tax_rate: 0.20,
        }
    }
}

impl ScenarioRequest {
    pub fn into_input(self) -> Result<ScenarioInput, InvalidInput> {
        let contract = ContractTerm::try_from(self.contract_years)?;
        let tax = TaxBracket::try_from(self.tax_rate)?;

        Ok(ScenarioInput {
            workforce: WorkforceProfile::new(clamp_count(self.total_workers), self.sector),
            current: HiringRecord::new(clamp_count(self.current_mild), clamp_count(self.current_severe)),
            additional: HiringRecord::new(
                clamp_count(self.additional_mild),
                clamp_count(self.additional_severe),
            ),
            contract,
            hours_per_day: HoursPerDay::new(self.hours_per_day),
            tax,
        })
    }
}

impl TryFrom<ScenarioRequest> for ScenarioInput {
    type Error = InvalidInput;

    fn try_from(request: ScenarioRequest) -> Result<Self, Self::Error> {
        request.into_input()
    }
}
