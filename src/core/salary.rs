use super::types::CareerStage;

pub fn career_boost(age: u32, stage: CareerStage) -> f64 {
    match age {
        0..=34 => match stage {
            CareerStage::Junior => 0.035,
            CareerStage::Mid => 0.025,
            CareerStage::Senior | CareerStage::Executive => 0.015,
        },
        35..=44 => match stage {
            CareerStage::Junior => 0.025,
            CareerStage::Mid => 0.020,
            CareerStage::Senior => 0.015,
            CareerStage::Executive => 0.020,
        },
        45..=54 => 0.010,
        _ => 0.0,
    }
}

pub fn salary_growth_rate(age: u32, stage: CareerStage, baseline_inflation: f64) -> f64 {
    baseline_inflation + career_boost(age, stage)
}

pub fn grow_salary(salary: f64, age: u32, stage: CareerStage, baseline_inflation: f64, delta: f64) -> f64 {
    (salary * (1.0 + salary_growth_rate(age, stage, baseline_inflation) + delta)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn boost_table_matches_bands() {
        assert_approx(career_boost(30, CareerStage::Junior), 0.035);
        assert_approx(career_boost(34, CareerStage::Mid), 0.025);
        assert_approx(career_boost(25, CareerStage::Executive), 0.015);
        assert_approx(career_boost(35, CareerStage::Junior), 0.025);
        assert_approx(career_boost(44, CareerStage::Mid), 0.020);
        assert_approx(career_boost(40, CareerStage::Senior), 0.015);
        assert_approx(career_boost(40, CareerStage::Executive), 0.020);
        for stage in [
            CareerStage::Junior,
            CareerStage::Mid,
            CareerStage::Senior,
            CareerStage::Executive,
        ] {
            assert_approx(career_boost(45, stage), 0.010);
            assert_approx(career_boost(54, stage), 0.010);
            assert_approx(career_boost(55, stage), 0.0);
            assert_approx(career_boost(70, stage), 0.0);
        }
    }

    #[test]
    fn growth_adds_baseline_and_scenario_delta() {
        assert_approx(salary_growth_rate(30, CareerStage::Mid, 0.02), 0.045);
        assert_approx(
            grow_salary(100_000.0, 30, CareerStage::Mid, 0.02, -0.01),
            103_500.0,
        );
        assert_approx(grow_salary(100_000.0, 60, CareerStage::Mid, 0.0, -2.0), 0.0);
    }
}
