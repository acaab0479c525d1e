use serde::Serialize;

use super::types::Scenario;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioModifiers {
    pub salary_growth_delta: f64,
    pub return_delta: f64,
    pub inflation_delta: f64,
    pub expense_multiplier: f64,
}

impl ScenarioModifiers {
    pub const NEUTRAL: ScenarioModifiers = ScenarioModifiers {
        salary_growth_delta: 0.0,
        return_delta: 0.0,
        inflation_delta: 0.0,
        expense_multiplier: 1.0,
    };

    pub const PESSIMISTIC: ScenarioModifiers = ScenarioModifiers {
        salary_growth_delta: -0.010,
        return_delta: -0.020,
        inflation_delta: 0.010,
        expense_multiplier: 1.10,
    };

    pub const OPTIMISTIC: ScenarioModifiers = ScenarioModifiers {
        salary_growth_delta: 0.005,
        return_delta: 0.015,
        inflation_delta: -0.005,
        expense_multiplier: 0.95,
    };

    pub fn for_scenario(scenario: Scenario) -> Self {
        match scenario {
            Scenario::Pessimistic => Self::PESSIMISTIC,
            Scenario::Neutral => Self::NEUTRAL,
            Scenario::Optimistic => Self::OPTIMISTIC,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Scenario {
    pub fn modifiers(self) -> ScenarioModifiers {
        ScenarioModifiers::for_scenario(self)
    }
}
