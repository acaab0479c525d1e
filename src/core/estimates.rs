use serde::{Deserialize, Serialize};
use tracing::warn;

use super::jurisdiction::normalize_tag;
use super::types::{HouseholdProfile, LifestyleTier};

/// Suggested monthly costs. `None` means "keep the profile's own value".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostEstimate {
    pub housing_monthly: Option<f64>,
    pub living_monthly: Option<f64>,
    pub daycare_monthly: Option<f64>,
    pub school_monthly: Option<f64>,
}

pub trait CostEstimator {
    fn estimate(
        &self,
        jurisdiction: &str,
        total_children: u32,
        lifestyle: LifestyleTier,
    ) -> Option<CostEstimate>;
}

struct RegionalCosts {
    tag: &'static str,
    housing_base: f64,
    housing_per_child: f64,
    living_base: f64,
    living_per_child: f64,
    daycare: f64,
    school: f64,
}

const REGIONAL_COSTS: [RegionalCosts; 5] = [
    RegionalCosts {
        tag: "ZH",
        housing_base: 2_600.0,
        housing_per_child: 350.0,
        living_base: 3_200.0,
        living_per_child: 600.0,
        daycare: 2_600.0,
        school: 550.0,
    },
    RegionalCosts {
        tag: "ZG",
        housing_base: 2_900.0,
        housing_per_child: 400.0,
        living_base: 3_300.0,
        living_per_child: 600.0,
        daycare: 2_500.0,
        school: 550.0,
    },
    RegionalCosts {
        tag: "GE",
        housing_base: 2_700.0,
        housing_per_child: 380.0,
        living_base: 3_300.0,
        living_per_child: 620.0,
        daycare: 2_200.0,
        school: 500.0,
    },
    RegionalCosts {
        tag: "BE",
        housing_base: 1_900.0,
        housing_per_child: 280.0,
        living_base: 2_900.0,
        living_per_child: 550.0,
        daycare: 2_100.0,
        school: 450.0,
    },
    RegionalCosts {
        tag: "BS",
        housing_base: 2_100.0,
        housing_per_child: 300.0,
        living_base: 3_000.0,
        living_per_child: 560.0,
        daycare: 2_300.0,
        school: 480.0,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceCostTable;

impl CostEstimator for ReferenceCostTable {
    fn estimate(
        &self,
        jurisdiction: &str,
        total_children: u32,
        lifestyle: LifestyleTier,
    ) -> Option<CostEstimate> {
        let tag = normalize_tag(jurisdiction);
        let costs = REGIONAL_COSTS.iter().find(|c| c.tag == tag)?;
        let scale = match lifestyle {
            LifestyleTier::Frugal => 0.85,
            LifestyleTier::Comfortable => 1.0,
            LifestyleTier::Premium => 1.3,
        };
        let children = total_children as f64;
        Some(CostEstimate {
            housing_monthly: Some((costs.housing_base + costs.housing_per_child * children) * scale),
            living_monthly: Some((costs.living_base + costs.living_per_child * children) * scale),
            daycare_monthly: Some(costs.daycare),
            school_monthly: Some(costs.school * scale),
        })
    }
}

/// Returns a copy of `profile` with every usable override applied. Missing, negative and
/// non-finite values are ignored.
pub fn apply_cost_estimate(
    profile: &HouseholdProfile,
    estimate: Option<CostEstimate>,
) -> HouseholdProfile {
    let mut adjusted = profile.clone();
    let Some(estimate) = estimate else {
        return adjusted;
    };

    for (label, value, target) in [
        (
            "housingMonthly",
            estimate.housing_monthly,
            &mut adjusted.housing_cost_monthly,
        ),
        (
            "livingMonthly",
            estimate.living_monthly,
            &mut adjusted.living_cost_monthly,
        ),
        (
            "daycareMonthly",
            estimate.daycare_monthly,
            &mut adjusted.daycare_cost_monthly,
        ),
        (
            "schoolMonthly",
            estimate.school_monthly,
            &mut adjusted.school_cost_monthly,
        ),
    ] {
        match value {
            Some(v) if v.is_finite() && v >= 0.0 => *target = v,
            Some(v) => warn!(field = label, value = v, "ignoring malformed cost override"),
            None => {}
        }
    }
    adjusted
}

pub fn estimate_costs(profile: &HouseholdProfile, estimator: &dyn CostEstimator) -> HouseholdProfile {
    let estimate = estimator.estimate(
        &profile.jurisdiction,
        profile.total_children(),
        profile.lifestyle,
    );
    apply_cost_estimate(profile, estimate)
}
