//! Tests for ration model building, solving, and interpretation.

use ovimax::data::{default_feeds, lookup_forage, lookup_stage};
use ovimax::models::{
    ConfigError, Feed, ForageStage, NutritionStage, PastureContext, RationPolicy, SolveStatus,
    SolvedRation,
};
use ovimax::optimizer::{
    build_ration_model, forage_intake_bounds, protein_capped_max, solve_ration, summarize_ration,
};

const TOL: f64 = 1e-6;

fn stage(name: &str) -> NutritionStage {
    lookup_stage(name).expect("stage should exist")
}

fn forage(name: &str) -> ForageStage {
    lookup_forage(name).expect("forage should exist")
}

fn pasture(available_forage_per_acre: f64, stocking_rate: f64) -> PastureContext {
    PastureContext {
        available_forage_per_acre,
        stocking_rate,
    }
}

fn feed(
    name: &str,
    cost_per_lb: f64,
    protein_pct: f64,
    tdn_pct: f64,
    dm_pct: f64,
    max_intake: f64,
    is_block: bool,
) -> Feed {
    Feed {
        name: name.to_string(),
        cost_per_lb,
        protein_pct,
        tdn_pct,
        dm_pct,
        min_intake: 0.0,
        max_intake,
        is_block,
        protein_capped: false,
    }
}

fn solve_scenario(
    stage: &NutritionStage,
    forage: &ForageStage,
    pasture: &PastureContext,
    feeds: &[Feed],
    policy: RationPolicy,
) -> SolvedRation {
    let model =
        build_ration_model(stage, forage, pasture, feeds, policy).expect("model should build");
    solve_ration(model)
}

// ============================================================================
// Feasible bounds
// ============================================================================

#[test]
fn test_forage_bounds_capped_by_appetite() {
    // 2000 lbs/acre at 90% DM and 90 head/acre gives a 20 lbs share, so the
    // binding limit is the 4.0 lbs appetite.
    let stage = stage("Last_4_Weeks_Gestation");
    let (lower, upper) = forage_intake_bounds(&stage, &forage("Dry"), &pasture(2000.0, 90.0), true);

    assert!((upper - 4.0).abs() < TOL);
    assert!((lower - 2.0).abs() < TOL);
}

#[test]
fn test_forage_bounds_capped_by_pasture_share() {
    // 180 lbs/acre at 90% DM and 90 head/acre gives a 1.8 lbs share, below
    // both the appetite and the half-DMI floor; the floor degrades to match.
    let stage = stage("Last_4_Weeks_Gestation");
    let (lower, upper) = forage_intake_bounds(&stage, &forage("Dry"), &pasture(180.0, 90.0), true);

    assert!((upper - 1.8).abs() < TOL);
    assert!((lower - 1.8).abs() < TOL);
}

#[test]
fn test_forage_bounds_exhausted_pasture() {
    let stage = stage("Last_4_Weeks_Gestation");
    let (lower, upper) = forage_intake_bounds(&stage, &forage("Dry"), &pasture(0.0, 90.0), true);

    assert_eq!(lower, 0.0);
    assert_eq!(upper, 0.0);
}

#[test]
fn test_forage_bounds_without_min_forage_rule() {
    let stage = stage("Last_4_Weeks_Gestation");
    let (lower, upper) =
        forage_intake_bounds(&stage, &forage("Dry"), &pasture(2000.0, 90.0), false);

    assert_eq!(lower, 0.0);
    assert!((upper - 4.0).abs() < TOL);
}

#[test]
fn test_protein_capped_ceiling() {
    // One third of the 0.42 lbs protein requirement at 33% protein content
    let stage = stage("Last_4_Weeks_Gestation");
    let pellet = feed("Range_Pellet", 0.29, 33.0, 85.0, 90.0, f64::INFINITY, true);

    let ceiling = protein_capped_max(&stage, &pellet);
    assert!((ceiling - 0.42 / 3.0 / 0.33).abs() < 1e-9);
}

// ============================================================================
// Configuration validation
// ============================================================================

#[test]
fn test_rejects_non_positive_stocking_rate() {
    let result = build_ration_model(
        &stage("Flushing"),
        &forage("Dry"),
        &pasture(2000.0, 0.0),
        &default_feeds(),
        RationPolicy::default(),
    );

    assert!(matches!(result, Err(ConfigError::InvalidStockingRate(_))));
}

#[test]
fn test_rejects_inverted_intake_bounds() {
    let mut bad = feed("Corn", 0.25, 9.0, 90.0, 88.0, 1.0, false);
    bad.min_intake = 2.0;

    let result = build_ration_model(
        &stage("Flushing"),
        &forage("Dry"),
        &pasture(2000.0, 90.0),
        &[bad],
        RationPolicy::default(),
    );

    assert!(matches!(result, Err(ConfigError::IntakeBounds { .. })));
}

#[test]
fn test_rejects_unbounded_block_feed() {
    let tub = feed("Bottomless_Tub", 0.50, 20.0, 85.0, 96.0, f64::INFINITY, true);

    let result = build_ration_model(
        &stage("Flushing"),
        &forage("Dry"),
        &pasture(2000.0, 90.0),
        &[tub],
        RationPolicy::default(),
    );

    assert!(matches!(result, Err(ConfigError::UnboundedBlockFeed { .. })));
}

// ============================================================================
// Solving
// ============================================================================

#[test]
fn test_default_scenario_meets_requirements() {
    let stage = stage("Last_4_Weeks_Gestation");
    let forage = forage("Dry");
    let pasture = pasture(2000.0, 90.0);
    let feeds = default_feeds();

    let solved = solve_scenario(&stage, &forage, &pasture, &feeds, RationPolicy::default());
    assert_eq!(solved.status, SolveStatus::Optimal);

    let report =
        summarize_ration(&solved, &stage, &forage, &pasture, &feeds).expect("optimal report");

    // Nutrient floors hold on the recomputed values
    assert!(report.nutrition.protein_lbs >= report.nutrition.protein_required_lbs - TOL);
    assert!(report.nutrition.tdn_lbs >= report.nutrition.tdn_required_lbs - TOL);

    // Supplementing dry forage costs money
    assert!(report.cost.daily_cost_per_head > 0.0);
    assert!(
        (report.cost.daily_herd_cost - report.cost.daily_cost_per_head * 90.0).abs() < TOL * 90.0
    );

    // Minimum forage utilization holds
    assert!(report.forage_intake >= 2.0 - TOL);
}

#[test]
fn test_exact_dmi_pins_total_intake() {
    let stage = stage("Last_4_Weeks_Gestation");
    let forage = forage("Dry");
    let pasture = pasture(2000.0, 90.0);
    let feeds = default_feeds();

    let solved = solve_scenario(&stage, &forage, &pasture, &feeds, RationPolicy::default());
    assert_eq!(solved.status, SolveStatus::Optimal);

    let total = solved.forage_intake + solved.total_supplement();
    assert!(
        (total - stage.dm_intake).abs() < TOL,
        "Exact-DMI total {} should equal the {} lbs limit",
        total,
        stage.dm_intake
    );
}

#[test]
fn test_dmi_ceiling_mode_bounds_total_intake() {
    let stage = stage("Last_4_Weeks_Gestation");
    let forage = forage("Dry");
    let pasture = pasture(2000.0, 90.0);
    let feeds = default_feeds();
    let policy = RationPolicy {
        exact_dmi: false,
        ..RationPolicy::default()
    };

    let solved = solve_scenario(&stage, &forage, &pasture, &feeds, policy);
    assert_eq!(solved.status, SolveStatus::Optimal);

    let total = solved.forage_intake + solved.total_supplement();
    assert!(total <= stage.dm_intake + TOL);
}

#[test]
fn test_range_pellet_ceiling_is_respected() {
    let stage = stage("Last_4_Weeks_Gestation");
    let forage = forage("Dry");
    let pasture = pasture(2000.0, 90.0);
    let feeds = default_feeds();

    let solved = solve_scenario(&stage, &forage, &pasture, &feeds, RationPolicy::default());
    assert_eq!(solved.status, SolveStatus::Optimal);

    let pellet = feeds
        .iter()
        .find(|f| f.name == "Purina_Accuration_Range_Pellet")
        .expect("range pellet exists");
    let ceiling = protein_capped_max(&stage, pellet);
    let intake = solved
        .intake("Purina_Accuration_Range_Pellet")
        .expect("pellet is in the model");
    assert!(intake <= ceiling + TOL);
}

#[test]
fn test_forage_only_gestation_is_infeasible() {
    // Dry forage at 5% protein cannot reach the 0.42 lbs requirement at a
    // pinned 4.0 lbs intake, and there are no supplements to make it up.
    let stage = stage("Last_4_Weeks_Gestation");
    let forage = forage("Dry");
    let pasture = pasture(2000.0, 90.0);

    let solved = solve_scenario(&stage, &forage, &pasture, &[], RationPolicy::default());
    assert_eq!(solved.status, SolveStatus::Infeasible);
    assert!(solved.intakes.is_empty());

    // A non-optimal solve has no report
    assert!(summarize_ration(&solved, &stage, &forage, &pasture, &[]).is_none());
}

#[test]
fn test_exhausted_pasture_solves_on_supplements() {
    let stage = stage("Last_4_Weeks_Gestation");
    let forage = forage("Dry");
    let pasture = pasture(0.0, 90.0);
    let feeds = default_feeds();

    let solved = solve_scenario(&stage, &forage, &pasture, &feeds, RationPolicy::default());
    assert_eq!(solved.status, SolveStatus::Optimal);
    assert!(solved.forage_intake.abs() < TOL);

    let report =
        summarize_ration(&solved, &stage, &forage, &pasture, &feeds).expect("optimal report");
    assert!(
        report.pasture.days_on_pasture.is_infinite(),
        "No forage consumption means an unlimited stay"
    );
}

#[test]
fn test_pure_lp_without_block_feeds() {
    let feeds = vec![
        feed("Corn", 0.25, 9.0, 90.0, 88.0, 3.0, false),
        feed("Soybean_Meal", 0.30, 44.0, 80.0, 89.0, 2.0, false),
    ];

    let stage = stage("Last_4_Weeks_Gestation");
    let solved = solve_scenario(
        &stage,
        &forage("Dry"),
        &pasture(2000.0, 90.0),
        &feeds,
        RationPolicy::default(),
    );

    assert_eq!(solved.status, SolveStatus::Optimal);
    assert!(
        solved.block_used.is_empty(),
        "No block feeds means no indicators"
    );
}

// ============================================================================
// Block exclusivity
// ============================================================================

fn block_test_feeds() -> Vec<Feed> {
    vec![
        feed("Block_A", 0.01, 30.0, 85.0, 96.0, 1.0, true),
        feed("Block_B", 0.01, 30.0, 85.0, 96.0, 1.0, true),
        feed("Corn", 0.25, 9.0, 90.0, 88.0, 3.0, false),
    ]
}

#[test]
fn test_block_exclusivity_allows_at_most_one() {
    // Both blocks are cheap enough that an unconstrained solve would use
    // both; exclusivity must keep one of them out.
    let stage = stage("Maintenance_Single");
    let forage = forage("Dry");
    let pasture = pasture(2000.0, 90.0);
    let feeds = block_test_feeds();

    let solved = solve_scenario(&stage, &forage, &pasture, &feeds, RationPolicy::default());
    assert_eq!(solved.status, SolveStatus::Optimal);

    let blocks_fed = solved
        .intakes
        .iter()
        .filter(|(name, amount)| name.starts_with("Block_") && *amount > TOL)
        .count();
    assert!(blocks_fed <= 1, "At most one block may carry intake");

    let indicators_set = solved
        .block_used
        .iter()
        .filter(|(_, value)| *value > 0.5)
        .count();
    assert!(indicators_set <= 1, "At most one indicator may be set");
}

#[test]
fn test_blocks_unrestricted_without_exclusivity() {
    let stage = stage("Maintenance_Single");
    let forage = forage("Dry");
    let pasture = pasture(2000.0, 90.0);
    let feeds = block_test_feeds();
    let policy = RationPolicy {
        block_exclusive: false,
        ..RationPolicy::default()
    };

    let solved = solve_scenario(&stage, &forage, &pasture, &feeds, policy);
    assert_eq!(solved.status, SolveStatus::Optimal);
    assert!(solved.block_used.is_empty(), "No indicators without the policy");

    // The TDN floor needs more than one block's worth of supplement, and
    // the blocks are far cheaper than corn, so both get used.
    let a = solved.intake("Block_A").expect("Block_A is in the model");
    let b = solved.intake("Block_B").expect("Block_B is in the model");
    assert!(a > TOL);
    assert!(b > TOL);
}

// ============================================================================
// Reporting properties
// ============================================================================

#[test]
fn test_objective_weakly_increases_with_feed_cost() {
    let stage = stage("Last_4_Weeks_Gestation");
    let forage = forage("Dry");
    let pasture = pasture(2000.0, 90.0);

    let feeds = default_feeds();
    let baseline = solve_scenario(&stage, &forage, &pasture, &feeds, RationPolicy::default());
    assert_eq!(baseline.status, SolveStatus::Optimal);

    let mut pricier = default_feeds();
    pricier
        .iter_mut()
        .find(|f| f.name == "Corn")
        .expect("corn exists")
        .cost_per_lb = 0.50;
    let bumped = solve_scenario(&stage, &forage, &pasture, &pricier, RationPolicy::default());
    assert_eq!(bumped.status, SolveStatus::Optimal);

    assert!(
        bumped.objective_value >= baseline.objective_value - TOL,
        "Raising a feed price cannot lower the optimal cost"
    );
}

#[test]
fn test_pasture_duration_non_increasing_in_stocking_rate() {
    let stage = stage("Last_4_Weeks_Gestation");
    let forage = forage("Dry");
    let feeds = default_feeds();

    let mut days = Vec::new();
    for rate in [50.0, 90.0] {
        let pasture = pasture(2000.0, rate);
        let solved = solve_scenario(&stage, &forage, &pasture, &feeds, RationPolicy::default());
        assert_eq!(solved.status, SolveStatus::Optimal);
        let report =
            summarize_ration(&solved, &stage, &forage, &pasture, &feeds).expect("optimal report");
        days.push(report.pasture.days_on_pasture);
    }

    assert!(
        days[0] >= days[1] - TOL,
        "More sheep per acre cannot stretch the pasture ({} vs {})",
        days[0],
        days[1]
    );
}

#[test]
fn test_report_totals_are_consistent() {
    let stage = stage("Last_4_Weeks_Gestation");
    let forage = forage("Dry");
    let pasture = pasture(2000.0, 90.0);
    let feeds = default_feeds();

    let solved = solve_scenario(&stage, &forage, &pasture, &feeds, RationPolicy::default());
    let report =
        summarize_ration(&solved, &stage, &forage, &pasture, &feeds).expect("optimal report");

    assert!(
        (report.total_intake - (report.forage_intake + report.total_supplement)).abs() < TOL
    );
    assert!(
        (report.supply.daily_herd_supplement - report.total_supplement * 90.0).abs() < TOL * 90.0
    );
    assert!(
        (report.pasture.daily_herd_forage - report.forage_intake * 90.0).abs() < TOL * 90.0
    );

    // Plan entries only list feeds that are actually fed, and their herd
    // scaling matches the per-head intake
    for entry in &report.feed_plan {
        assert!(entry.daily_intake > 1e-3);
        assert!((entry.daily_herd_amount - entry.daily_intake * 90.0).abs() < TOL * 90.0);
    }
}
