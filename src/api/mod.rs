use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    CareerStage, HORIZON_AGE, HouseholdProfile, LifestyleTier, ProfileError, ProjectionPolicy,
    ProjectionReport, ReferenceCostTable, UniversityCostPolicy, ViabilityPolicy, build_report,
    estimate_costs,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCareerStage {
    Junior,
    Mid,
    Senior,
    Executive,
}

impl From<CliCareerStage> for CareerStage {
    fn from(value: CliCareerStage) -> Self {
        match value {
            CliCareerStage::Junior => CareerStage::Junior,
            CliCareerStage::Mid => CareerStage::Mid,
            CliCareerStage::Senior => CareerStage::Senior,
            CliCareerStage::Executive => CareerStage::Executive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliLifestyle {
    Frugal,
    Comfortable,
    Premium,
}

impl From<CliLifestyle> for LifestyleTier {
    fn from(value: CliLifestyle) -> Self {
        match value {
            CliLifestyle::Frugal => LifestyleTier::Frugal,
            CliLifestyle::Comfortable => LifestyleTier::Comfortable,
            CliLifestyle::Premium => LifestyleTier::Premium,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiCareerStage {
    Junior,
    #[serde(alias = "medior", alias = "middle")]
    Mid,
    Senior,
    #[serde(alias = "exec")]
    Executive,
}

impl From<ApiCareerStage> for CliCareerStage {
    fn from(value: ApiCareerStage) -> Self {
        match value {
            ApiCareerStage::Junior => CliCareerStage::Junior,
            ApiCareerStage::Mid => CliCareerStage::Mid,
            ApiCareerStage::Senior => CliCareerStage::Senior,
            ApiCareerStage::Executive => CliCareerStage::Executive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiLifestyle {
    #[serde(alias = "basic")]
    Frugal,
    #[serde(alias = "standard")]
    Comfortable,
    #[serde(alias = "luxury")]
    Premium,
}

impl From<ApiLifestyle> for CliLifestyle {
    fn from(value: ApiLifestyle) -> Self {
        match value {
            ApiLifestyle::Frugal => CliLifestyle::Frugal,
            ApiLifestyle::Comfortable => CliLifestyle::Comfortable,
            ApiLifestyle::Premium => CliLifestyle::Premium,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_age: Option<u32>,
    partner_age: Option<u32>,
    retirement_age: Option<u32>,
    start_year: Option<i32>,

    current_children: Option<u32>,
    future_children: Option<u32>,
    child_spacing_years: Option<u32>,
    first_child_birth_year_offset: Option<u32>,

    salary_primary: Option<f64>,
    salary_partner: Option<f64>,
    career_stage_primary: Option<ApiCareerStage>,
    career_stage_partner: Option<ApiCareerStage>,
    annual_bonus: Option<f64>,

    inflation: Option<f64>,
    investment_return: Option<f64>,
    savings: Option<f64>,

    pillar2_primary: Option<f64>,
    pillar2_partner: Option<f64>,
    pillar3_primary: Option<f64>,
    pillar3_partner: Option<f64>,
    pillar3_contribution_primary: Option<f64>,
    pillar3_contribution_partner: Option<f64>,

    housing_cost: Option<f64>,
    housing_rooms: Option<f64>,
    housing_inflation: Option<f64>,
    living_cost: Option<f64>,
    daycare_cost: Option<f64>,
    school_cost: Option<f64>,
    travel_cost: Option<f64>,
    university_support: Option<f64>,

    jurisdiction: Option<String>,
    lifestyle: Option<ApiLifestyle>,
    estimate_costs: Option<bool>,

    university_years: Option<u32>,
    viability_buffer: Option<f64>,
    search_min_age: Option<u32>,
    search_max_age: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lifeplan project",
    about = "Household financial projection across pessimistic/neutral/optimistic scenarios"
)]
struct Cli {
    #[arg(
        long,
        help = "Load the household profile from a JSON file; profile flags are then ignored"
    )]
    profile: Option<PathBuf>,
    #[arg(long, default_value_t = 35)]
    current_age: u32,
    #[arg(long, help = "Partner age, defaults to --current-age")]
    partner_age: Option<u32>,
    #[arg(long, default_value_t = 65)]
    retirement_age: u32,
    #[arg(long, default_value_t = 2025, help = "Calendar year of the first projected year")]
    start_year: i32,
    #[arg(long, default_value_t = 1)]
    current_children: u32,
    #[arg(long, default_value_t = 1)]
    future_children: u32,
    #[arg(long, default_value_t = 2)]
    child_spacing_years: u32,
    #[arg(
        long,
        default_value_t = 1,
        help = "Years until the first future child is born"
    )]
    first_child_birth_year_offset: u32,
    #[arg(long, default_value_t = 110000.0)]
    salary_primary: f64,
    #[arg(long, default_value_t = 90000.0)]
    salary_partner: f64,
    #[arg(long, value_enum, default_value_t = CliCareerStage::Mid)]
    career_stage_primary: CliCareerStage,
    #[arg(long, value_enum, default_value_t = CliCareerStage::Mid)]
    career_stage_partner: CliCareerStage,
    #[arg(long, default_value_t = 10000.0, help = "Annual bonus in today's money")]
    annual_bonus: f64,
    #[arg(long, default_value_t = 1.5, help = "Baseline inflation in percent")]
    inflation_rate: f64,
    #[arg(long, default_value_t = 4.5, help = "Investment return in percent")]
    investment_return: f64,
    #[arg(long, default_value_t = 150000.0, help = "Free savings (cash + investments)")]
    savings: f64,
    #[arg(long, default_value_t = 120000.0)]
    pillar2_primary: f64,
    #[arg(long, default_value_t = 80000.0)]
    pillar2_partner: f64,
    #[arg(long, default_value_t = 40000.0)]
    pillar3_primary: f64,
    #[arg(long, default_value_t = 25000.0)]
    pillar3_partner: f64,
    #[arg(long, default_value_t = 7056.0, help = "Planned annual pillar-3 contribution")]
    pillar3_contribution_primary: f64,
    #[arg(long, default_value_t = 7056.0, help = "Planned annual pillar-3 contribution")]
    pillar3_contribution_partner: f64,
    #[arg(long, default_value_t = 2800.0, help = "Monthly rent")]
    housing_cost_monthly: f64,
    #[arg(long, default_value_t = 4.5)]
    housing_rooms: f64,
    #[arg(long, default_value_t = 2.0, help = "Rent inflation in percent")]
    housing_inflation: f64,
    #[arg(long, default_value_t = 3500.0)]
    living_cost_monthly: f64,
    #[arg(long, default_value_t = 2500.0)]
    daycare_cost_monthly: f64,
    #[arg(long, default_value_t = 600.0)]
    school_cost_monthly: f64,
    #[arg(long, default_value_t = 700.0)]
    travel_cost_monthly: f64,
    #[arg(long, default_value_t = 60000.0, help = "University support per child")]
    university_support_total: f64,
    #[arg(long, default_value = "ZH", help = "Canton code used for the net-income factor")]
    jurisdiction: String,
    #[arg(long, value_enum, default_value_t = CliLifestyle::Comfortable)]
    lifestyle: CliLifestyle,
    #[arg(long, help = "Override housing/living/childcare costs with reference estimates")]
    estimate_costs: bool,
    #[arg(
        long,
        default_value_t = 4,
        help = "Years the university support is spread over; 0 charges the full amount every year"
    )]
    university_years: u32,
    #[arg(
        long,
        help = "Count a run as viable when final wealth exceeds this buffer instead of never depleting"
    )]
    viability_buffer: Option<f64>,
    #[arg(long, default_value_t = 50)]
    search_min_age: u32,
    #[arg(long, default_value_t = 65)]
    search_max_age: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse profile file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid profile: {0}")]
    Invalid(#[from] ProfileError),
}

#[derive(Debug)]
struct ProjectRequest {
    profile: HouseholdProfile,
    policy: ProjectionPolicy,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    profile: HouseholdProfile,
    report: ProjectionReport,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn load_profile(path: &Path) -> Result<HouseholdProfile, ConfigError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    let profile: HouseholdProfile =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
    profile.validate()?;
    Ok(profile)
}

fn build_request(cli: Cli) -> Result<ProjectRequest, String> {
    let policy = build_policy(&cli)?;

    let profile = match &cli.profile {
        Some(path) => load_profile(path).map_err(|e| e.to_string())?,
        None => profile_from_cli(&cli),
    };
    profile.validate().map_err(|e| e.to_string())?;

    let profile = if cli.estimate_costs {
        estimate_costs(&profile, &ReferenceCostTable)
    } else {
        profile
    };

    Ok(ProjectRequest { profile, policy })
}

fn profile_from_cli(cli: &Cli) -> HouseholdProfile {
    HouseholdProfile {
        current_age: cli.current_age,
        partner_age: cli.partner_age,
        retirement_age: cli.retirement_age,
        start_year: cli.start_year,
        current_children: cli.current_children,
        future_children: cli.future_children,
        child_spacing_years: cli.child_spacing_years,
        first_child_birth_year_offset: cli.first_child_birth_year_offset,
        salary_primary: cli.salary_primary,
        salary_partner: cli.salary_partner,
        career_stage_primary: cli.career_stage_primary.into(),
        career_stage_partner: cli.career_stage_partner.into(),
        annual_bonus: cli.annual_bonus,
        inflation: cli.inflation_rate / 100.0,
        investment_return: cli.investment_return / 100.0,
        savings: cli.savings,
        pillar2_primary: cli.pillar2_primary,
        pillar2_partner: cli.pillar2_partner,
        pillar3_primary: cli.pillar3_primary,
        pillar3_partner: cli.pillar3_partner,
        pillar3_contribution_primary: cli.pillar3_contribution_primary,
        pillar3_contribution_partner: cli.pillar3_contribution_partner,
        housing_cost_monthly: cli.housing_cost_monthly,
        housing_rooms: cli.housing_rooms,
        housing_inflation: cli.housing_inflation / 100.0,
        living_cost_monthly: cli.living_cost_monthly,
        daycare_cost_monthly: cli.daycare_cost_monthly,
        school_cost_monthly: cli.school_cost_monthly,
        travel_cost_monthly: cli.travel_cost_monthly,
        university_support_total: cli.university_support_total,
        jurisdiction: cli.jurisdiction.clone(),
        lifestyle: cli.lifestyle.into(),
    }
}

fn build_policy(cli: &Cli) -> Result<ProjectionPolicy, String> {
    if cli.search_min_age > cli.search_max_age {
        return Err("--search-min-age must be <= --search-max-age".to_string());
    }
    if cli.search_max_age > HORIZON_AGE {
        return Err(format!("--search-max-age must be <= {HORIZON_AGE}"));
    }
    let viability = match cli.viability_buffer {
        Some(buffer) if !buffer.is_finite() => {
            return Err("--viability-buffer must be finite".to_string());
        }
        Some(buffer) => ViabilityPolicy::FinalWealthAbove(buffer),
        None => ViabilityPolicy::NeverDepleted,
    };
    let university_cost = match cli.university_years {
        0 => UniversityCostPolicy::FullAmountPerYear,
        years => UniversityCostPolicy::SpreadOverYears(years),
    };
    Ok(ProjectionPolicy {
        university_cost,
        viability,
        search_min_age: cli.search_min_age,
        search_max_age: cli.search_max_age,
        ..ProjectionPolicy::default()
    })
}

/// Parses `lifeplan project` flags, runs every scenario and returns the report as JSON.
pub fn run_project_command<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let request = build_request(cli)?;
    let response = ProjectResponse {
        report: build_report(&request.profile, &request.policy),
        profile: request.profile,
    };
    serde_json::to_string_pretty(&response).map_err(|e| format!("failed to encode report: {e}"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "lifeplan HTTP API listening");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, serde_json::json!({ "status": "ok" }))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            warn!(error = %msg, "rejected projection request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let report = build_report(&request.profile, &request.policy);
    json_response(
        StatusCode::OK,
        ProjectResponse {
            profile: request.profile,
            report,
        },
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ProjectRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ProjectPayload) -> Result<ProjectRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if payload.partner_age.is_some() {
        cli.partner_age = payload.partner_age;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.start_year {
        cli.start_year = v;
    }
    if let Some(v) = payload.current_children {
        cli.current_children = v;
    }
    if let Some(v) = payload.future_children {
        cli.future_children = v;
    }
    if let Some(v) = payload.child_spacing_years {
        cli.child_spacing_years = v;
    }
    if let Some(v) = payload.first_child_birth_year_offset {
        cli.first_child_birth_year_offset = v;
    }
    if let Some(v) = payload.salary_primary {
        cli.salary_primary = v;
    }
    if let Some(v) = payload.salary_partner {
        cli.salary_partner = v;
    }
    if let Some(v) = payload.career_stage_primary {
        cli.career_stage_primary = v.into();
    }
    if let Some(v) = payload.career_stage_partner {
        cli.career_stage_partner = v.into();
    }
    if let Some(v) = payload.annual_bonus {
        cli.annual_bonus = v;
    }
    if let Some(v) = payload.inflation {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.investment_return {
        cli.investment_return = v;
    }
    if let Some(v) = payload.savings {
        cli.savings = v;
    }
    if let Some(v) = payload.pillar2_primary {
        cli.pillar2_primary = v;
    }
    if let Some(v) = payload.pillar2_partner {
        cli.pillar2_partner = v;
    }
    if let Some(v) = payload.pillar3_primary {
        cli.pillar3_primary = v;
    }
    if let Some(v) = payload.pillar3_partner {
        cli.pillar3_partner = v;
    }
    if let Some(v) = payload.pillar3_contribution_primary {
        cli.pillar3_contribution_primary = v;
    }
    if let Some(v) = payload.pillar3_contribution_partner {
        cli.pillar3_contribution_partner = v;
    }
    if let Some(v) = payload.housing_cost {
        cli.housing_cost_monthly = v;
    }
    if let Some(v) = payload.housing_rooms {
        cli.housing_rooms = v;
    }
    if let Some(v) = payload.housing_inflation {
        cli.housing_inflation = v;
    }
    if let Some(v) = payload.living_cost {
        cli.living_cost_monthly = v;
    }
    if let Some(v) = payload.daycare_cost {
        cli.daycare_cost_monthly = v;
    }
    if let Some(v) = payload.school_cost {
        cli.school_cost_monthly = v;
    }
    if let Some(v) = payload.travel_cost {
        cli.travel_cost_monthly = v;
    }
    if let Some(v) = payload.university_support {
        cli.university_support_total = v;
    }
    if let Some(v) = payload.jurisdiction {
        cli.jurisdiction = v;
    }
    if let Some(v) = payload.lifestyle {
        cli.lifestyle = v.into();
    }
    if let Some(v) = payload.estimate_costs {
        cli.estimate_costs = v;
    }
    if let Some(v) = payload.university_years {
        cli.university_years = v;
    }
    if payload.viability_buffer.is_some() {
        cli.viability_buffer = payload.viability_buffer;
    }
    if let Some(v) = payload.search_min_age {
        cli.search_min_age = v;
    }
    if let Some(v) = payload.search_max_age {
        cli.search_max_age = v;
    }

    build_request(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        profile: None,
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
        career_stage_primary: CliCareerStage::Mid,
        career_stage_partner: CliCareerStage::Mid,
        annual_bonus: 10_000.0,
        inflation_rate: 1.5,
        investment_return: 4.5,
        savings: 150_000.0,
        pillar2_primary: 120_000.0,
        pillar2_partner: 80_000.0,
        pillar3_primary: 40_000.0,
        pillar3_partner: 25_000.0,
        pillar3_contribution_primary: 7_056.0,
        pillar3_contribution_partner: 7_056.0,
        housing_cost_monthly: 2_800.0,
        housing_rooms: 4.5,
        housing_inflation: 2.0,
        living_cost_monthly: 3_500.0,
        daycare_cost_monthly: 2_500.0,
        school_cost_monthly: 600.0,
        travel_cost_monthly: 700.0,
        university_support_total: 60_000.0,
        jurisdiction: "ZH".to_string(),
        lifestyle: CliLifestyle::Comfortable,
        estimate_costs: false,
        university_years: 4,
        viability_buffer: None,
        search_min_age: 50,
        search_max_age: 65,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Scenario;
    use std::fs;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        default_cli_for_api()
    }

    #[test]
    fn api_defaults_match_default_profile() {
        let request = build_request(sample_cli()).expect("defaults are valid");
        assert_eq!(request.profile, HouseholdProfile::default());
        assert_eq!(request.policy, ProjectionPolicy::default());
    }

    #[test]
    fn cli_flags_parse_with_defaults() {
        let cli = Cli::parse_from([
            "lifeplan project",
            "--current-age",
            "40",
            "--career-stage-primary",
            "senior",
            "--inflation-rate",
            "2",
            "--viability-buffer",
            "50000",
        ]);
        let request = build_request(cli).expect("valid flags");
        assert_eq!(request.profile.current_age, 40);
        assert_eq!(request.profile.career_stage_primary, CareerStage::Senior);
        assert_approx(request.profile.inflation, 0.02);
        assert_eq!(
            request.policy.viability,
            ViabilityPolicy::FinalWealthAbove(50_000.0)
        );
    }

    #[test]
    fn api_request_from_json_parses_web_keys() {
        let json = r#"{
          "currentAge": 31,
          "partnerAge": 29,
          "retirementAge": 60,
          "salaryPrimary": 95000,
          "careerStagePrimary": "junior",
          "careerStagePartner": "exec",
          "inflation": 2,
          "investmentReturn": 5,
          "housingCost": 2100,
          "housingRooms": 3.5,
          "daycareCost": 2300,
          "jurisdiction": "zg",
          "lifestyle": "frugal",
          "universityYears": 0
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        let profile = request.profile;

        assert_eq!(profile.current_age, 31);
        assert_eq!(profile.partner_age, Some(29));
        assert_eq!(profile.retirement_age, 60);
        assert_approx(profile.salary_primary, 95_000.0);
        assert_eq!(profile.career_stage_primary, CareerStage::Junior);
        assert_eq!(profile.career_stage_partner, CareerStage::Executive);
        assert_approx(profile.inflation, 0.02);
        assert_approx(profile.investment_return, 0.05);
        assert_approx(profile.housing_cost_monthly, 2_100.0);
        assert_approx(profile.housing_rooms, 3.5);
        assert_approx(profile.daycare_cost_monthly, 2_300.0);
        assert_eq!(profile.jurisdiction, "zg");
        assert_eq!(profile.lifestyle, LifestyleTier::Frugal);
        assert_eq!(
            request.policy.university_cost,
            UniversityCostPolicy::FullAmountPerYear
        );
    }

    #[test]
    fn api_request_rejects_retirement_before_current_age() {
        let err = api_request_from_json(r#"{ "currentAge": 50, "retirementAge": 45 }"#)
            .expect_err("must reject");
        assert!(err.contains("retirement age"));
    }

    #[test]
    fn build_request_rejects_negative_costs_and_inverted_search_range() {
        let mut cli = sample_cli();
        cli.living_cost_monthly = -5.0;
        let err = build_request(cli).expect_err("negative cost");
        assert!(err.contains("livingCostMonthly"));

        let mut cli = sample_cli();
        cli.search_min_age = 66;
        let err = build_request(cli).expect_err("inverted range");
        assert!(err.contains("--search-min-age"));
    }

    #[test]
    fn api_request_rejects_search_bound_beyond_horizon() {
        let err = api_request_from_json(r#"{ "searchMaxAge": 4000000000 }"#)
            .expect_err("unbounded search must be rejected");
        assert!(err.contains("--search-max-age"));

        let request =
            api_request_from_json(r#"{ "searchMaxAge": 90 }"#).expect("horizon is allowed");
        assert_eq!(request.policy.search_max_age, HORIZON_AGE);
    }

    #[test]
    fn estimate_costs_flag_applies_reference_table() {
        let mut cli = sample_cli();
        cli.estimate_costs = true;
        cli.jurisdiction = "BE".to_string();
        let request = build_request(cli).expect("valid");
        assert_ne!(request.profile.housing_cost_monthly, 2_800.0);

        let mut cli = sample_cli();
        cli.estimate_costs = true;
        cli.jurisdiction = "XX".to_string();
        let request = build_request(cli).expect("unknown canton is not an error");
        assert_approx(request.profile.housing_cost_monthly, 2_800.0);
    }

    #[test]
    fn load_profile_reads_json_and_reports_errors() {
        let dir = std::env::temp_dir().join(format!("lifeplan-test-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");

        let good = dir.join("good.json");
        fs::write(&good, r#"{ "currentAge": 44, "retirementAge": 60 }"#).expect("write");
        let profile = load_profile(&good).expect("valid profile file");
        assert_eq!(profile.current_age, 44);
        assert_eq!(profile.retirement_age, 60);

        let broken = dir.join("broken.json");
        fs::write(&broken, "{ not json").expect("write");
        assert!(matches!(
            load_profile(&broken),
            Err(ConfigError::Parse { .. })
        ));

        let invalid = dir.join("invalid.json");
        fs::write(&invalid, r#"{ "currentAge": 60, "retirementAge": 50 }"#).expect("write");
        assert!(matches!(
            load_profile(&invalid),
            Err(ConfigError::Invalid(_))
        ));

        assert!(matches!(
            load_profile(&dir.join("missing.json")),
            Err(ConfigError::Read { .. })
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn project_response_serialization_contains_expected_fields() {
        let request = build_request(sample_cli()).expect("valid");
        let report = build_report(&request.profile, &request.policy);
        assert_eq!(report.scenarios.len(), 3);
        assert!(report.scenario(Scenario::Neutral).is_some());

        let response = ProjectResponse {
            profile: request.profile,
            report,
        };
        let json = serde_json::to_string(&response).expect("response should serialize");
        for key in [
            "\"profile\"",
            "\"scenarios\"",
            "\"earlyRetirement\"",
            "\"earliestViableAge\"",
            "\"finalWealth\"",
            "\"peakWealth\"",
            "\"depletionAge\"",
            "\"retirementSnapshot\"",
            "\"occupationalAnnuity\"",
            "\"netCashFlow\"",
            "\"unfundedShortfall\"",
            "\"pessimistic\"",
            "\"retirement-started\"",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
    }

    #[test]
    fn run_project_command_emits_json_report() {
        let json = run_project_command(["lifeplan project", "--future-children", "0"])
            .expect("command succeeds");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["report"]["scenarios"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["profile"]["futureChildren"], 0);
    }
}
