use serde::Serialize;
use tracing::debug;

use super::engine::simulate_projection;
use super::scenario::ScenarioModifiers;
use super::types::{HORIZON_AGE, HouseholdProfile, ProjectionPolicy, Scenario};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementCandidate {
    pub retirement_age: u32,
    pub viable: bool,
    pub final_wealth: f64,
    pub depletion_age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementSearchResult {
    pub search_min_age: u32,
    pub search_max_age: u32,
    pub earliest_viable_age: Option<u32>,
    pub candidates: Vec<RetirementCandidate>,
    pub message: String,
}

pub fn find_earliest_retirement_age(
    profile: &HouseholdProfile,
    policy: &ProjectionPolicy,
) -> Option<u32> {
    search_retirement_ages(profile, policy).earliest_viable_age
}

/// Candidates below the current age are skipped.
pub fn search_retirement_ages(
    profile: &HouseholdProfile,
    policy: &ProjectionPolicy,
) -> RetirementSearchResult {
    let lower = policy.search_min_age.max(profile.current_age);
    let upper = policy.search_max_age.min(HORIZON_AGE);

    let candidates: Vec<RetirementCandidate> = (lower..=upper)
        .map(|retirement_age| {
            let run = simulate_projection(
                profile,
                retirement_age,
                Scenario::Neutral,
                ScenarioModifiers::NEUTRAL,
                policy,
            );
            RetirementCandidate {
                retirement_age,
                viable: run.viable,
                final_wealth: run.final_wealth,
                depletion_age: run.depletion_age,
            }
        })
        .collect();

    let earliest_viable_age = candidates
        .iter()
        .find(|candidate| candidate.viable)
        .map(|candidate| candidate.retirement_age);

    let message = match earliest_viable_age {
        Some(age) => format!("Earliest sustainable retirement age is {age}."),
        None if candidates.is_empty() => {
            "No candidate retirement age lies between the current age and the search bound."
                .to_string()
        }
        None => format!("No sustainable retirement age found between {lower} and {upper}."),
    };
    debug!(
        lower,
        upper,
        earliest = ?earliest_viable_age,
        "early retirement search finished"
    );

    RetirementSearchResult {
        search_min_age: lower,
        search_max_age: upper,
        earliest_viable_age,
        candidates,
        message,
    }
}
