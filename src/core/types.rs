use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pension::RetirementSnapshot;
use super::solver::RetirementSearchResult;

pub const HORIZON_AGE: u32 = 90;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CareerStage {
    Junior,
    Mid,
    Senior,
    Executive,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifestyleTier {
    Frugal,
    Comfortable,
    Premium,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Pessimistic,
    Neutral,
    Optimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Pessimistic,
        Scenario::Neutral,
        Scenario::Optimistic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Scenario::Pessimistic => "pessimistic",
            Scenario::Neutral => "neutral",
            Scenario::Optimistic => "optimistic",
        }
    }
}

/// How the university support amount is charged while a child is 19..25.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "years")]
pub enum UniversityCostPolicy {
    FullAmountPerYear,
    SpreadOverYears(u32),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "buffer")]
pub enum ViabilityPolicy {
    NeverDepleted,
    FinalWealthAbove(f64),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPolicy {
    pub university_cost: UniversityCostPolicy,
    pub viability: ViabilityPolicy,
    pub depletion_threshold: f64,
    pub search_min_age: u32,
    pub search_max_age: u32,
}

impl Default for ProjectionPolicy {
    fn default() -> Self {
        Self {
            university_cost: UniversityCostPolicy::SpreadOverYears(4),
            viability: ViabilityPolicy::NeverDepleted,
            depletion_threshold: 1.0,
            search_min_age: 50,
            search_max_age: 65,
        }
    }
}

/// Immutable household input for a projection run. Rates are fractions (0.02 = 2 %), money is
/// nominal in start-year currency, monthly costs are per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseholdProfile {
    pub current_age: u32,
    pub partner_age: Option<u32>,
    pub retirement_age: u32,
    pub start_year: i32,

    pub current_children: u32,
    pub future_children: u32,
    pub child_spacing_years: u32,
    pub first_child_birth_year_offset: u32,

    pub salary_primary: f64,
    pub salary_partner: f64,
    pub career_stage_primary: CareerStage,
    pub career_stage_partner: CareerStage,
    pub annual_bonus: f64,

    pub inflation: f64,
    pub investment_return: f64,
    pub savings: f64,

    pub pillar2_primary: f64,
    pub pillar2_partner: f64,
    pub pillar3_primary: f64,
    pub pillar3_partner: f64,
    pub pillar3_contribution_primary: f64,
    pub pillar3_contribution_partner: f64,

    pub housing_cost_monthly: f64,
    pub housing_rooms: f64,
    pub housing_inflation: f64,

    pub living_cost_monthly: f64,
    pub daycare_cost_monthly: f64,
    pub school_cost_monthly: f64,
    pub travel_cost_monthly: f64,
    pub university_support_total: f64,

    pub jurisdiction: String,
    pub lifestyle: LifestyleTier,
}

impl Default for HouseholdProfile {
    fn default() -> Self {
        Self {
            current_age: 35,
            partner_age: Some(33),
            retirement_age: 65,
            start_year: 2025,
            current_children: 1,
            future_children: 1,
            child_spacing_years: 2,
            first_child_birth_year_offset: 1,
            salary_primary: 110_000.0,
            salary_partner: 90_000.0,
            career_stage_primary: CareerStage::Mid,
            career_stage_partner: CareerStage::Mid,
            annual_bonus: 10_000.0,
            inflation: 0.015,
            investment_return: 0.045,
            savings: 150_000.0,
            pillar2_primary: 120_000.0,
            pillar2_partner: 80_000.0,
            pillar3_primary: 40_000.0,
            pillar3_partner: 25_000.0,
            pillar3_contribution_primary: 7_056.0,
            pillar3_contribution_partner: 7_056.0,
            housing_cost_monthly: 2_800.0,
            housing_rooms: 4.5,
            housing_inflation: 0.02,
            living_cost_monthly: 3_500.0,
            daycare_cost_monthly: 2_500.0,
            school_cost_monthly: 600.0,
            travel_cost_monthly: 700.0,
            university_support_total: 60_000.0,
            jurisdiction: "ZH".to_string(),
            lifestyle: LifestyleTier::Comfortable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("{field} must be a finite amount >= 0 (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error("{field} must be a finite rate above -100% (got {value})")]
    InvalidRate { field: &'static str, value: f64 },
    #[error("retirement age {retirement_age} must be >= current age {current_age}")]
    RetirementBeforeCurrentAge { current_age: u32, retirement_age: u32 },
    #[error("age {0} is beyond the projection horizon")]
    BeyondHorizon(u32),
    #[error("housing rooms must be > 0 (got {0})")]
    InvalidRooms(f64),
}

impl HouseholdProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.current_age > HORIZON_AGE {
            return Err(ProfileError::BeyondHorizon(self.current_age));
        }
        if let Some(partner_age) = self.partner_age {
            if partner_age > HORIZON_AGE {
                return Err(ProfileError::BeyondHorizon(partner_age));
            }
        }
        if self.retirement_age < self.current_age {
            return Err(ProfileError::RetirementBeforeCurrentAge {
                current_age: self.current_age,
                retirement_age: self.retirement_age,
            });
        }
        if !self.housing_rooms.is_finite() || self.housing_rooms <= 0.0 {
            return Err(ProfileError::InvalidRooms(self.housing_rooms));
        }

        for (field, value) in [
            ("salaryPrimary", self.salary_primary),
            ("salaryPartner", self.salary_partner),
            ("annualBonus", self.annual_bonus),
            ("savings", self.savings),
            ("pillar2Primary", self.pillar2_primary),
            ("pillar2Partner", self.pillar2_partner),
            ("pillar3Primary", self.pillar3_primary),
            ("pillar3Partner", self.pillar3_partner),
            ("pillar3ContributionPrimary", self.pillar3_contribution_primary),
            ("pillar3ContributionPartner", self.pillar3_contribution_partner),
            ("housingCostMonthly", self.housing_cost_monthly),
            ("livingCostMonthly", self.living_cost_monthly),
            ("daycareCostMonthly", self.daycare_cost_monthly),
            ("schoolCostMonthly", self.school_cost_monthly),
            ("travelCostMonthly", self.travel_cost_monthly),
            ("universitySupportTotal", self.university_support_total),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::InvalidAmount { field, value });
            }
        }

        for (field, value) in [
            ("inflation", self.inflation),
            ("investmentReturn", self.investment_return),
            ("housingInflation", self.housing_inflation),
        ] {
            if !value.is_finite() || value <= -1.0 {
                return Err(ProfileError::InvalidRate { field, value });
            }
        }

        Ok(())
    }

    pub fn partner_age_or_primary(&self) -> u32 {
        self.partner_age.unwrap_or(self.current_age)
    }

    pub fn total_children(&self) -> u32 {
        self.current_children + self.future_children
    }

    pub fn planned_pillar3_contribution(&self) -> f64 {
        self.pillar3_contribution_primary + self.pillar3_contribution_partner
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifeEvent {
    ChildBorn,
    Relocated,
    RetirementStarted,
    FundsDepleted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    pub salaries: f64,
    pub bonus: f64,
    pub pension: f64,
    pub gross: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub housing: f64,
    pub living: f64,
    pub children: f64,
    pub travel: f64,
    pub total: f64,
}

impl ExpenseBreakdown {
    pub fn new(housing: f64, living: f64, children: f64, travel: f64) -> Self {
        Self {
            housing,
            living,
            children,
            travel,
            total: housing + living + children + travel,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionBreakdown {
    pub public: f64,
    pub occupational: f64,
    pub private: f64,
    pub gross: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthBalances {
    pub cash: f64,
    pub invested: f64,
    pub pillar2: f64,
    pub pillar3: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySnapshot {
    pub age: u32,
    pub year: i32,
    pub retired: bool,
    pub active_children: u32,
    pub monthly_rent: f64,
    pub income: IncomeBreakdown,
    pub expenses: ExpenseBreakdown,
    pub pension: PensionBreakdown,
    pub pillar3_contribution: f64,
    pub wealth: WealthBalances,
    pub net_cash_flow: f64,
    pub unfunded_shortfall: f64,
    pub deficit: bool,
    pub depleted: bool,
    pub notes: Vec<LifeEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub retirement_age: u32,
    pub years: Vec<YearlySnapshot>,
    pub final_wealth: f64,
    pub peak_wealth: f64,
    pub viable: bool,
    pub depletion_age: Option<u32>,
    pub wealth_at_retirement: Option<f64>,
    pub retirement_snapshot: Option<RetirementSnapshot>,
    pub deficit_years: u32,
    pub total_unfunded_shortfall: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionReport {
    pub policy: ProjectionPolicy,
    pub scenarios: Vec<ScenarioResult>,
    pub early_retirement: RetirementSearchResult,
}

impl ProjectionReport {
    pub fn scenario(&self, scenario: Scenario) -> Option<&ScenarioResult> {
        self.scenarios.iter().find(|r| r.scenario == scenario)
    }
}
