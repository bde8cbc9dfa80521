use crate::levy::{EmploymentRate, HiringRecord, QuotaContext, QuotaEngine};
use crate::policy::LevyPolicy;
use crate::priority::{self, PriorityClassifier, PriorityTier};

use super::domain::{CompanyOrigin, CompanyProfile, CompanyRecord, ManualCompany};

/// Derives levy estimates and priorities for registry entries.
#[derive(Debug, Clone)]
pub struct CompanyAssessor {
    dataset: QuotaEngine,
    manual: QuotaEngine,
    classifier: PriorityClassifier,
}

impl CompanyAssessor {
    pub fn new(policy: &LevyPolicy) -> Self {
        Self {
            dataset: QuotaEngine::for_context(policy, QuotaContext::SalesDataset),
            manual: QuotaEngine::for_context(policy, QuotaContext::ManualEntry),
            classifier: PriorityClassifier::new(policy.priority, policy.disclosure),
        }
    }

    pub fn classifier(&self) -> &PriorityClassifier {
        &self.classifier
    }

    pub fn assess_dataset(&self, profile: CompanyProfile) -> CompanyRecord {
        self.assess(profile, CompanyOrigin::Dataset, None)
    }

    pub fn assess_manual(&self, company: ManualCompany) -> CompanyRecord {
        self.assess(company.profile, CompanyOrigin::Manual, company.priority_override)
    }

    fn assess(
        &self,
        profile: CompanyProfile,
        origin: CompanyOrigin,
        priority_override: Option<PriorityTier>,
    ) -> CompanyRecord {
        let engine = match origin {
            CompanyOrigin::Dataset => &self.dataset,
            CompanyOrigin::Manual => &self.manual,
        };
        let hiring = HiringRecord::unweighted(profile.hired_count);
        let assessment = engine.assess_hiring(&profile.workforce(), &hiring);
        let recognized = assessment.recognized_headcount;

        let computed_priority = self.classifier.classify(assessment.shortfall, profile.hired_count);
        let priority = priority::resolve(computed_priority, priority_override);

        CompanyRecord {
            origin,
            required_count: assessment.mandatory_count,
            gap: assessment.shortfall,
            tier: assessment.tier,
            employment_rate: EmploymentRate::of(recognized, profile.total_workers),
            is_publicly_named: self
                .classifier
                .is_publicly_named(recognized, profile.total_workers),
            estimated_annual_levy: assessment.annual_levy,
            priority,
            computed_priority,
            profile,
        }
    }
}
