use std::thread;

use tracing::{debug, info};

use super::children::ChildCostSchedule;
use super::housing::HousingModel;
use super::jurisdiction::net_income_factor;
use super::ledger::{WealthLedger, WorkingContributions};
use super::pension::{PensionModel, RetirementSnapshot};
use super::salary::grow_salary;
use super::scenario::ScenarioModifiers;
use super::solver::search_retirement_ages;
use super::types::{
    ExpenseBreakdown, HORIZON_AGE, HouseholdProfile, IncomeBreakdown, LifeEvent, PensionBreakdown,
    ProjectionPolicy, ProjectionReport, Scenario, ScenarioResult, ViabilityPolicy, YearlySnapshot,
};

pub fn run_projection(
    profile: &HouseholdProfile,
    scenario: Scenario,
    policy: &ProjectionPolicy,
) -> ScenarioResult {
    simulate_projection(
        profile,
        profile.retirement_age,
        scenario,
        scenario.modifiers(),
        policy,
    )
}

pub fn run_all_scenarios(
    profile: &HouseholdProfile,
    policy: &ProjectionPolicy,
) -> Vec<ScenarioResult> {
    thread::scope(|scope| {
        let handles = Scenario::ALL
            .map(|scenario| scope.spawn(move || run_projection(profile, scenario, policy)));
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}

pub fn build_report(profile: &HouseholdProfile, policy: &ProjectionPolicy) -> ProjectionReport {
    let scenarios = run_all_scenarios(profile, policy);
    let early_retirement = search_retirement_ages(profile, policy);
    for result in &scenarios {
        info!(
            scenario = result.scenario.label(),
            final_wealth = result.final_wealth,
            viable = result.viable,
            depletion_age = ?result.depletion_age,
            "scenario projected"
        );
    }
    ProjectionReport {
        policy: *policy,
        scenarios,
        early_retirement,
    }
}

/// `retirement_age` overrides the profile's own value so searches never need a modified copy of
/// the profile. Depletion is recorded but never stops the run.
pub fn simulate_projection(
    profile: &HouseholdProfile,
    retirement_age: u32,
    scenario: Scenario,
    modifiers: ScenarioModifiers,
    policy: &ProjectionPolicy,
) -> ScenarioResult {
    let inflation = profile.inflation + modifiers.inflation_delta;
    let investment_return = profile.investment_return + modifiers.return_delta;
    let tax_factor = net_income_factor(&profile.jurisdiction);
    let expense_multiplier = modifiers.expense_multiplier;

    let mut ledger = WealthLedger::new(
        profile.savings,
        profile.pillar2_primary + profile.pillar2_partner,
        profile.pillar3_primary + profile.pillar3_partner,
        investment_return,
    );
    let mut children = ChildCostSchedule::new(profile, policy.university_cost);
    let mut housing = HousingModel::new(
        profile.housing_cost_monthly,
        profile.housing_rooms,
        profile.housing_inflation + modifiers.inflation_delta,
    );
    let mut pension = PensionModel::default();

    let mut salaries = [profile.salary_primary, profile.salary_partner];
    let stages = [profile.career_stage_primary, profile.career_stage_partner];
    let earner_ages = [profile.current_age, profile.partner_age_or_primary()];

    // Costs follow the scenario inflation; bonus and public pension stay on the baseline index.
    let mut inflation_factor = 1.0;
    let mut baseline_factor = 1.0;
    let mut depletion_age = None;
    let mut years = Vec::with_capacity(HORIZON_AGE.saturating_sub(profile.current_age) as usize + 1);

    for (offset, age) in (profile.current_age..=HORIZON_AGE).enumerate() {
        if offset > 0 {
            inflation_factor *= 1.0 + inflation;
            baseline_factor *= 1.0 + profile.inflation;
            housing.inflate_year();
            children.advance_year();
        }

        let mut notes = Vec::new();
        if children.newborns() > 0 {
            notes.push(LifeEvent::ChildBorn);
        }

        let active_children = children.active_count();
        if housing.evaluate_capacity(active_children, age) {
            debug!(
                scenario = scenario.label(),
                age,
                monthly_rent = housing.monthly_rent(),
                "household outgrew its home; relocated"
            );
            notes.push(LifeEvent::Relocated);
        }

        if !pension.is_retired() && age >= retirement_age {
            let occupational_capital = ledger.take_pillar2();
            let snapshot = pension.retire(
                age,
                baseline_factor,
                occupational_capital,
                ledger.pillar3(),
            );
            debug!(scenario = scenario.label(), age, ?snapshot, "retirement started");
            notes.push(LifeEvent::RetirementStarted);
        }

        let expenses = ExpenseBreakdown::new(
            housing.annual_cost(),
            profile.living_cost_monthly * 12.0 * inflation_factor * expense_multiplier,
            children.annual_cost() * expense_multiplier,
            profile.travel_cost_monthly * 12.0 * inflation_factor * expense_multiplier,
        );

        let (income, pension_income, contributions) = if pension.is_retired() {
            let private_paid = ledger.draw_pillar3(pension.private_drawdown());
            let payout = pension.yearly_payout(baseline_factor, private_paid);
            let income = IncomeBreakdown {
                salaries: 0.0,
                bonus: 0.0,
                pension: payout.gross,
                gross: payout.gross,
                net: payout.net,
            };
            (income, payout, None)
        } else {
            let salary_total = salaries[0] + salaries[1];
            let bonus = profile.annual_bonus * baseline_factor;
            let gross = salary_total + bonus;
            let income = IncomeBreakdown {
                salaries: salary_total,
                bonus,
                pension: 0.0,
                gross,
                net: gross * tax_factor,
            };
            let contributions = WorkingContributions {
                gross_salaries: salary_total,
                planned_pillar3: profile.planned_pillar3_contribution(),
            };
            (income, PensionBreakdown::default(), Some(contributions))
        };

        let net_cash_flow = income.net - expenses.total;
        let outcome = ledger.advance(net_cash_flow, contributions);
        let wealth = ledger.balances();

        let depleted =
            outcome.unfunded_shortfall > policy.depletion_threshold || wealth.total <= 0.0;
        if depleted && depletion_age.is_none() {
            depletion_age = Some(age);
            debug!(
                scenario = scenario.label(),
                age,
                shortfall = outcome.unfunded_shortfall,
                "funds depleted"
            );
            notes.push(LifeEvent::FundsDepleted);
        }

        years.push(YearlySnapshot {
            age,
            year: profile.start_year + offset as i32,
            retired: pension.is_retired(),
            active_children,
            monthly_rent: housing.monthly_rent(),
            income,
            expenses,
            pension: pension_income,
            pillar3_contribution: outcome.pillar3_contribution,
            wealth,
            net_cash_flow,
            unfunded_shortfall: outcome.unfunded_shortfall,
            deficit: net_cash_flow < 0.0,
            depleted,
            notes,
        });

        if !pension.is_retired() {
            for idx in 0..salaries.len() {
                salaries[idx] = grow_salary(
                    salaries[idx],
                    earner_ages[idx] + offset as u32,
                    stages[idx],
                    profile.inflation,
                    modifiers.salary_growth_delta,
                );
            }
        }
    }

    summarize(scenario, retirement_age, years, depletion_age, pension.snapshot(), policy)
}

fn summarize(
    scenario: Scenario,
    retirement_age: u32,
    years: Vec<YearlySnapshot>,
    depletion_age: Option<u32>,
    retirement_snapshot: Option<RetirementSnapshot>,
    policy: &ProjectionPolicy,
) -> ScenarioResult {
    let final_wealth = years.last().map(|y| y.wealth.total).unwrap_or(0.0);
    let peak_wealth = years
        .iter()
        .map(|y| y.wealth.total)
        .fold(0.0_f64, f64::max);
    let wealth_at_retirement = years
        .iter()
        .find(|y| y.retired)
        .map(|y| y.wealth.total);
    let deficit_years = years.iter().filter(|y| y.deficit).count() as u32;
    let total_unfunded_shortfall = years.iter().map(|y| y.unfunded_shortfall).sum();

    let viable = match policy.viability {
        ViabilityPolicy::NeverDepleted => depletion_age.is_none(),
        ViabilityPolicy::FinalWealthAbove(buffer) => final_wealth > buffer,
    };

    ScenarioResult {
        scenario,
        retirement_age,
        years,
        final_wealth,
        peak_wealth,
        viable,
        depletion_age,
        wealth_at_retirement,
        retirement_snapshot,
        deficit_years,
        total_unfunded_shortfall,
    }
}
