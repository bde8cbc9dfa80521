//! Sales-targeting priority and public-disclosure eligibility.
//!
//! Computing the default tier and applying a hand-entered override are separate
//! steps: [`PriorityClassifier::classify`] never looks at an override, and
//! [`resolve`] never recomputes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::levy::EmploymentRate;

const BASIS_POINTS_PER_UNIT: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityTier {
    A,
    B,
    C,
}

impl PriorityTier {
    pub const fn ordered() -> [PriorityTier; 3] {
        [PriorityTier::A, PriorityTier::B, PriorityTier::C]
    }

    pub const fn code(self) -> &'static str {
        match self {
            PriorityTier::A => "A",
            PriorityTier::B => "B",
            PriorityTier::C => "C",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PriorityTier::A => "contact immediately",
            PriorityTier::B => "review first",
            PriorityTier::C => "keep under watch",
        }
    }
}

impl FromStr for PriorityTier {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(PriorityTier::A),
            "B" => Ok(PriorityTier::B),
            "C" => Ok(PriorityTier::C),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Shortfall cut-offs for the A and B tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityThresholds {
    pub tier_a_shortfall: u32,
    pub tier_b_shortfall: u32,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            tier_a_shortfall: 15,
            tier_b_shortfall: 6,
        }
    }
}

/// Employment-rate floor below which a company is publicly named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosurePolicy {
    pub threshold: EmploymentRate,
}

impl Default for DisclosurePolicy {
    fn default() -> Self {
        Self {
            threshold: EmploymentRate::from_basis_points(155),
        }
    }
}

/// Default tier for a company, or `None` when it has no shortfall.
///
/// A zero-hire company with any shortfall is always tier A.
pub fn classify_priority(
    shortfall: u32,
    hired_count: u32,
    thresholds: &PriorityThresholds,
) -> Option<PriorityTier> {
    if shortfall == 0 {
        return None;
    }
    if shortfall >= thresholds.tier_a_shortfall || hired_count == 0 {
        Some(PriorityTier::A)
    } else if shortfall >= thresholds.tier_b_shortfall {
        Some(PriorityTier::B)
    } else {
        Some(PriorityTier::C)
    }
}

/// User-supplied priority wins over the computed one.
pub fn resolve(
    computed: Option<PriorityTier>,
    override_tier: Option<PriorityTier>,
) -> Option<PriorityTier> {
    override_tier.or(computed)
}

/// Exact `recognized / total < threshold`, compared before any display rounding.
///
/// Companies without a workforce are never named.
pub fn is_publicly_named(
    recognized_headcount: u32,
    total_workers: u32,
    threshold: EmploymentRate,
) -> bool {
    if total_workers == 0 {
        return false;
    }
    u64::from(recognized_headcount) * BASIS_POINTS_PER_UNIT
        < u64::from(threshold.basis_points()) * u64::from(total_workers)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityClassifier {
    thresholds: PriorityThresholds,
    disclosure: DisclosurePolicy,
}

impl PriorityClassifier {
    pub fn new(thresholds: PriorityThresholds, disclosure: DisclosurePolicy) -> Self {
        Self {
            thresholds,
            disclosure,
        }
    }

    pub fn thresholds(&self) -> &PriorityThresholds {
        &self.thresholds
    }

    pub fn disclosure_threshold(&self) -> EmploymentRate {
        self.disclosure.threshold
    }

    pub fn classify(&self, shortfall: u32, hired_count: u32) -> Option<PriorityTier> {
        classify_priority(shortfall, hired_count, &self.thresholds)
    }

    pub fn is_publicly_named(&self, recognized_headcount: u32, total_workers: u32) -> bool {
        is_publicly_named(recognized_headcount, total_workers, self.disclosure.threshold)
    }
}
