mod children;
mod engine;
mod estimates;
mod housing;
mod jurisdiction;
mod ledger;
mod pension;
mod salary;
mod scenario;
mod solver;
mod types;

pub use children::{ChildCostSchedule, initial_child_ages, university_support_per_year};
pub use engine::{build_report, run_all_scenarios, run_projection, simulate_projection};
pub use estimates::{
    CostEstimate, CostEstimator, ReferenceCostTable, apply_cost_estimate, estimate_costs,
};
pub use housing::{HousingModel, HousingState, RELOCATION_SHOCK};
pub use jurisdiction::net_income_factor;
pub use ledger::{LedgerOutcome, WealthLedger, WorkingContributions};
pub use pension::{
    OCCUPATIONAL_CONVERSION_RATE, PUBLIC_PENSION_COUPLE_ANNUAL, PensionModel, PensionPhase,
    RETIREMENT_NET_FACTOR, RetirementSnapshot,
};
pub use salary::{career_boost, salary_growth_rate};
pub use scenario::ScenarioModifiers;
pub use solver::{
    RetirementCandidate, RetirementSearchResult, find_earliest_retirement_age,
    search_retirement_ages,
};
pub use types::{
    CareerStage, ExpenseBreakdown, HORIZON_AGE, HouseholdProfile, IncomeBreakdown, LifeEvent,
    LifestyleTier, PensionBreakdown, ProfileError, ProjectionPolicy, ProjectionReport, Scenario,
    ScenarioResult, UniversityCostPolicy, ViabilityPolicy, WealthBalances, YearlySnapshot,
};
