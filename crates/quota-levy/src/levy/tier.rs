use serde::{Deserialize, Serialize};

use super::quota::ComplianceRatio;

/// Penalty bracket, ordered from least to most compliant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyTier {
    /// No recognized headcount at all.
    Zero,
    Below25,
    Below50,
    Below75,
    /// At least three quarters of the quota, but not all of it.
    Above75,
    /// Quota met, or nothing is mandatory.
    Achieved,
}

impl PenaltyTier {
    /// Tier for a headcount against a mandatory count.
    ///
    /// Boundaries are exclusive upper bounds, so a ratio of exactly 0.25 lands in
    /// [`PenaltyTier::Below50`].
    pub fn classify(recognized_headcount: u32, mandatory_count: u32) -> PenaltyTier {
        let Some(ratio) = ComplianceRatio::of(recognized_headcount, mandatory_count) else {
            return PenaltyTier::Achieved;
        };
        if ratio.is_met() {
            return PenaltyTier::Achieved;
        }
        if recognized_headcount == 0 {
            return PenaltyTier::Zero;
        }
        if ratio.is_below(1, 4) {
            PenaltyTier::Below25
        } else if ratio.is_below(1, 2) {
            PenaltyTier::Below50
        } else if ratio.is_below(3, 4) {
            PenaltyTier::Below75
        } else {
            PenaltyTier::Above75
        }
    }

    pub const fn ordered() -> [PenaltyTier; 6] {
        [
            PenaltyTier::Zero,
            PenaltyTier::Below25,
            PenaltyTier::Below50,
            PenaltyTier::Below75,
            PenaltyTier::Above75,
            PenaltyTier::Achieved,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            PenaltyTier::Zero => "No disabled employees",
            PenaltyTier::Below25 => "Below 1/4 of quota",
            PenaltyTier::Below50 => "1/4 to 1/2 of quota",
            PenaltyTier::Below75 => "1/2 to 3/4 of quota",
            PenaltyTier::Above75 => "3/4 of quota or more",
            PenaltyTier::Achieved => "Quota achieved",
        }
    }

    pub const fn is_achieved(self) -> bool {
        matches!(self, PenaltyTier::Achieved)
    }
}
