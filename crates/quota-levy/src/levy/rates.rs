use std::fmt;

use serde::{Deserialize, Serialize};

use super::money::Won;
use super::tier::PenaltyTier;

/// Monthly per-head levy for each non-achieved tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRateTable {
    pub zero: Won,
    pub below_25: Won,
    pub below_50: Won,
    pub below_75: Won,
    pub above_75: Won,
}

impl PenaltyRateTable {
    /// Ministry of Employment and Labor base amounts for 2025.
    pub const VINTAGE_2025: PenaltyRateTable = PenaltyRateTable {
        zero: Won(2_096_270),
        below_25: Won(1_761_200),
        below_50: Won(1_509_600),
        below_75: Won(1_333_480),
        above_75: Won(1_258_000),
    };

    pub fn monthly_rate(&self, tier: PenaltyTier) -> Won {
        match tier {
            PenaltyTier::Achieved => Won::ZERO,
            PenaltyTier::Zero => self.zero,
            PenaltyTier::Below25 => self.below_25,
            PenaltyTier::Below50 => self.below_50,
            PenaltyTier::Below75 => self.below_75,
            PenaltyTier::Above75 => self.above_75,
        }
    }

    pub fn rate_for(&self, recognized_headcount: u32, mandatory_count: u32) -> Won {
        self.monthly_rate(PenaltyTier::classify(recognized_headcount, mandatory_count))
    }

    /// Shortfall times the applicable tier rate.
    pub fn monthly_levy(&self, shortfall: u32, recognized_headcount: u32, mandatory_count: u32) -> Won {
        self.rate_for(recognized_headcount, mandatory_count)
            .times(shortfall)
    }

    /// Rates from the least to the most compliant tier.
    pub fn descending(&self) -> [Won; 6] {
        PenaltyTier::ordered().map(|tier| self.monthly_rate(tier))
    }
}

/// Length of a solution-service contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ContractTerm {
    OneYear,
    ThreeYear,
}

impl ContractTerm {
    pub const fn years(self) -> u8 {
        match self {
            ContractTerm::OneYear => 1,
            ContractTerm::ThreeYear => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ContractTerm::OneYear => "1-year contract",
            ContractTerm::ThreeYear => "3-year contract",
        }
    }
}

impl TryFrom<u8> for ContractTerm {
    type Error = UnsupportedContractTerm;

    fn try_from(years: u8) -> Result<Self, Self::Error> {
        match years {
            1 => Ok(ContractTerm::OneYear),
            3 => Ok(ContractTerm::ThreeYear),
            other => Err(UnsupportedContractTerm(other)),
        }
    }
}

impl From<ContractTerm> for u8 {
    fn from(term: ContractTerm) -> Self {
        term.years()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("contract length must be 1 or 3 years, got {0}")]
pub struct UnsupportedContractTerm(pub u8);

/// Monthly per-head fee for the placement service, by contract length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRateTable {
    pub one_year: Won,
    pub three_year: Won,
}

impl ServiceRateTable {
    pub const VINTAGE_2025: ServiceRateTable = ServiceRateTable {
        one_year: Won(500_000),
        three_year: Won(370_000),
    };

    pub fn monthly_rate(&self, term: ContractTerm) -> Won {
        match term {
            ContractTerm::OneYear => self.one_year,
            ContractTerm::ThreeYear => self.three_year,
        }
    }
}

/// Minimum-wage basis for pricing additional hires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageSchedule {
    pub hourly_wage: Won,
    pub working_days_per_month: u32,
}

impl WageSchedule {
    pub const VINTAGE_2026: WageSchedule = WageSchedule {
        hourly_wage: Won(10_320),
        working_days_per_month: 22,
    };

    /// Monthly wage for one hire, rounded to the won.
    pub fn monthly_wage(&self, hours_per_day: f64) -> Won {
        let raw = self.hourly_wage.get() as f64 * hours_per_day * f64::from(self.working_days_per_month);
        Won(raw.round() as i64)
    }
}

/// Flat incentive paid per recognized head above the quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveSchedule {
    pub monthly_per_head: Won,
}

impl IncentiveSchedule {
    pub const AVERAGE_2025: IncentiveSchedule = IncentiveSchedule {
        monthly_per_head: Won(675_000),
    };
}

impl fmt::Display for ContractTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
