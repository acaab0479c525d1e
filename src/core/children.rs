use super::types::{HouseholdProfile, LifestyleTier, UniversityCostPolicy};

/// Children at or beyond this age no longer cost anything or count towards household size.
pub const CHILD_SUPPORT_END_AGE: i32 = 25;
const SCHOOL_START_AGE: i32 = 5;
const UNIVERSITY_START_AGE: i32 = 19;
const FRUGAL_UNIVERSITY_FACTOR: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct ChildCostSchedule {
    ages: Vec<i32>,
    daycare_annual: f64,
    school_annual: f64,
    university_annual: f64,
}

impl ChildCostSchedule {
    pub fn new(profile: &HouseholdProfile, university_cost: UniversityCostPolicy) -> Self {
        Self {
            ages: initial_child_ages(profile),
            daycare_annual: profile.daycare_cost_monthly * 12.0,
            school_annual: profile.school_cost_monthly * 12.0,
            university_annual: university_support_per_year(
                profile.university_support_total,
                university_cost,
                profile.lifestyle,
            ),
        }
    }

    pub fn ages(&self) -> &[i32] {
        &self.ages
    }

    pub fn advance_year(&mut self) {
        for age in &mut self.ages {
            *age += 1;
        }
    }

    pub fn active_count(&self) -> u32 {
        self.ages
            .iter()
            .filter(|&&age| (0..CHILD_SUPPORT_END_AGE).contains(&age))
            .count() as u32
    }

    pub fn newborns(&self) -> u32 {
        self.ages.iter().filter(|&&age| age == 0).count() as u32
    }

    pub fn annual_cost(&self) -> f64 {
        self.ages.iter().map(|&age| self.cost_for_age(age)).sum()
    }

    fn cost_for_age(&self, age: i32) -> f64 {
        match age {
            a if a < 0 => 0.0,
            a if a < SCHOOL_START_AGE => self.daycare_annual,
            a if a < UNIVERSITY_START_AGE => self.school_annual,
            a if a < CHILD_SUPPORT_END_AGE => self.university_annual,
            _ => 0.0,
        }
    }
}

/// Existing children are placed at ages 2, 4, 6, ...; future children start at
/// `-(first_offset + index * spacing)`.
pub fn initial_child_ages(profile: &HouseholdProfile) -> Vec<i32> {
    let existing = (0..profile.current_children).map(|idx| idx as i32 * 2 + 2);
    let future = (0..profile.future_children).map(|idx| {
        -(profile.first_child_birth_year_offset as i32 + idx as i32 * profile.child_spacing_years as i32)
    });
    existing.chain(future).collect()
}

pub fn university_support_per_year(
    total: f64,
    policy: UniversityCostPolicy,
    lifestyle: LifestyleTier,
) -> f64 {
    let per_year = match policy {
        UniversityCostPolicy::FullAmountPerYear => total,
        UniversityCostPolicy::SpreadOverYears(years) => total / years.max(1) as f64,
    };
    match lifestyle {
        LifestyleTier::Frugal => per_year * FRUGAL_UNIVERSITY_FACTOR,
        LifestyleTier::Comfortable | LifestyleTier::Premium => per_year,
    }
}
