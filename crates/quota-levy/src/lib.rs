//! Employment-quota levy engine for the disability employment dashboard.
//!
//! A company's workforce and disabled headcount go in; the mandatory-hire
//! shortfall and the tiered levy it owes come out. The calculator prices extra
//! hiring against that levy, and the company registry applies the same engine
//! to a static dataset plus a user-maintained manual subset.

pub mod comparator;
pub mod config;
pub mod error;
pub mod input;
pub mod levy;
pub mod policy;
pub mod priority;
pub mod registry;
pub mod telemetry;

pub use comparator::{ComparisonResult, CostComparator, ScenarioInput, ScenarioRequest};
pub use input::InvalidInput;
pub use levy::{
    HiringRecord, LevyAssessment, PenaltyTier, QuotaContext, QuotaEngine, Sector, ViewMode, Won,
    WorkforceProfile,
};
pub use policy::LevyPolicy;
pub use priority::{PriorityClassifier, PriorityTier};
