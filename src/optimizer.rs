//! Ration optimization for Ovimax.
//!
//! This module contains the algorithmic core: deriving feasible intake
//! bounds from the pasture and the nutrition stage, building the
//! minimum-cost ration model, invoking the LP/MILP solver, and interpreting
//! the solved intakes into a herd-scale feeding report.

use good_lp::{
    constraint, default_solver, variable, Constraint, Expression, ProblemVariables,
    ResolutionError, Solution, SolverModel, Variable,
};

use crate::models::{
    ConfigError, CostAnalysis, Feed, FeedPlanEntry, ForageStage, NutrientAnalysis, NutritionStage,
    PastureAnalysis, PastureContext, RationPolicy, RationReport, SolveStatus, SolvedRation,
    SupplyPlan,
};

/// Intakes at or below this level are treated as unused in the feeding plan.
const USED_FEED_EPS: f64 = 1e-3;

/// Derives the feasible forage intake range for one head.
///
/// The upper bound is the smaller of the animal's appetite (the stage DMI
/// limit) and its share of the standing pasture dry matter at the given
/// stocking rate. When `min_forage` is set, the lower bound asks for half
/// the DMI limit but never exceeds the upper bound, so a scarce pasture
/// degrades the range instead of making it empty.
///
/// A pasture share that computes to a non-positive value collapses the
/// range to `[0, 0]`; whether the ration is still feasible on supplements
/// alone is the solver's verdict, not this function's.
///
/// # Arguments
///
/// * `stage` - Nutrition stage supplying the DMI limit
/// * `forage` - Forage maturity stage supplying the dry-matter fraction
/// * `pasture` - Standing forage and stocking rate (stocking rate must be
///   positive; the model builder validates this)
/// * `min_forage` - Whether the minimum forage utilization rule applies
///
/// # Returns
///
/// `(lower, upper)` intake bounds in lbs/day.
pub fn forage_intake_bounds(
    stage: &NutritionStage,
    forage: &ForageStage,
    pasture: &PastureContext,
    min_forage: bool,
) -> (f64, f64) {
    let per_head_share = pasture.standing_dry_matter(forage) / pasture.stocking_rate;
    let upper = stage.dm_intake.min(per_head_share).max(0.0);
    let lower = if min_forage {
        (stage.dm_intake * 0.5).min(upper)
    } else {
        0.0
    };
    (lower, upper)
}

/// Intake ceiling for a protein-capped feed.
///
/// At most one third of the stage's protein requirement may come from this
/// supplement category; the ceiling is the intake at which the feed's
/// protein content reaches that allowance.
pub fn protein_capped_max(stage: &NutritionStage, feed: &Feed) -> f64 {
    let allowed_protein_lbs = stage.protein_required_lbs() / 3.0;
    allowed_protein_lbs / (feed.protein_pct / 100.0)
}

fn effective_max_intake(stage: &NutritionStage, feed: &Feed) -> f64 {
    if feed.protein_capped {
        feed.max_intake.min(protein_capped_max(stage, feed))
    } else {
        feed.max_intake
    }
}

struct FeedVar {
    name: String,
    cost_per_lb: f64,
    var: Variable,
}

/// A built, ready-to-solve ration model.
///
/// Holds the decision variables (one continuous intake per feed plus
/// forage, and one binary indicator per block feed when exclusivity is
/// active), the constraint set, and the minimize-cost objective.
pub struct RationModel {
    vars: ProblemVariables,
    objective: Expression,
    constraints: Vec<Constraint>,
    forage_var: Variable,
    feed_vars: Vec<FeedVar>,
    block_vars: Vec<(String, Variable)>,
}

impl RationModel {
    /// The intake variable for a feed, by name.
    pub fn feed_variable(&self, name: &str) -> Option<Variable> {
        self.feed_vars
            .iter()
            .find(|fv| fv.name == name)
            .map(|fv| fv.var)
    }

    /// The forage intake variable.
    pub fn forage_variable(&self) -> Variable {
        self.forage_var
    }

    /// The minimize-cost objective expression.
    pub fn objective(&self) -> &Expression {
        &self.objective
    }

    /// Number of binary block indicators in the model.
    pub fn block_indicator_count(&self) -> usize {
        self.block_vars.len()
    }
}

/// Builds the minimum-cost ration model.
///
/// One continuous intake variable is created per feed, bounded by the
/// feed's declared range (with the protein-derived ceiling applied to
/// protein-capped feeds), plus one for forage bounded by
/// [`forage_intake_bounds`]. The constraint set covers the protein and TDN
/// floors, the dry-matter-content ceiling, the total-intake rule selected
/// by `policy.exact_dmi`, and, when `policy.block_exclusive` is set and
/// block feeds exist, the binary linking and at-most-one-block constraints.
///
/// The objective minimizes supplement cost; forage carries no cost.
///
/// # Errors
///
/// Returns a [`ConfigError`] for a non-positive stocking rate, a feed whose
/// minimum intake exceeds its effective maximum, or a block feed with no
/// finite ceiling. These are input defects and never reach the solver.
pub fn build_ration_model(
    stage: &NutritionStage,
    forage: &ForageStage,
    pasture: &PastureContext,
    feeds: &[Feed],
    policy: RationPolicy,
) -> Result<RationModel, ConfigError> {
    if pasture.stocking_rate <= 0.0 {
        return Err(ConfigError::InvalidStockingRate(pasture.stocking_rate));
    }

    let (forage_lower, forage_upper) =
        forage_intake_bounds(stage, forage, pasture, policy.min_forage);

    let mut vars = ProblemVariables::new();
    let forage_var = vars.add(variable().min(forage_lower).max(forage_upper));

    let mut feed_vars = Vec::with_capacity(feeds.len());
    let mut block_vars = Vec::new();
    let mut constraints = Vec::new();
    let mut objective = Expression::from(0.0);

    for feed in feeds {
        let max_intake = effective_max_intake(stage, feed);
        if feed.min_intake > max_intake {
            return Err(ConfigError::IntakeBounds {
                name: feed.name.clone(),
                min: feed.min_intake,
                max: max_intake,
            });
        }
        if policy.block_exclusive && feed.is_block && !max_intake.is_finite() {
            return Err(ConfigError::UnboundedBlockFeed {
                name: feed.name.clone(),
            });
        }

        let var = vars.add(variable().min(feed.min_intake).max(max_intake));
        objective += feed.cost_per_lb * var;

        if policy.block_exclusive && feed.is_block {
            // Indicator forces zero intake when the block is unused and
            // permits up to the ceiling when it is.
            let used = vars.add(variable().binary());
            constraints.push(constraint!(var <= max_intake * used));
            block_vars.push((feed.name.clone(), used));
        }

        feed_vars.push(FeedVar {
            name: feed.name.clone(),
            cost_per_lb: feed.cost_per_lb,
            var,
        });
    }

    if !block_vars.is_empty() {
        let blocks_in_use = block_vars
            .iter()
            .fold(Expression::from(0.0), |acc, (_, used)| acc + *used);
        constraints.push(constraint!(blocks_in_use <= 1.0));
    }

    let mut protein_lbs = forage.protein_pct / 100.0 * forage_var;
    let mut tdn_lbs = forage.tdn_pct / 100.0 * forage_var;
    let mut dry_matter_lbs = forage.dm_pct / 100.0 * forage_var;
    let mut total_intake = Expression::from(forage_var);
    for (feed, fv) in feeds.iter().zip(&feed_vars) {
        protein_lbs += feed.protein_pct / 100.0 * fv.var;
        tdn_lbs += feed.tdn_pct / 100.0 * fv.var;
        dry_matter_lbs += feed.dm_pct / 100.0 * fv.var;
        total_intake = total_intake + fv.var;
    }

    let protein_req = stage.protein_required_lbs();
    let tdn_req = stage.tdn_required_lbs();
    let dmi_limit = stage.dm_intake;
    constraints.push(constraint!(protein_lbs >= protein_req));
    constraints.push(constraint!(tdn_lbs >= tdn_req));
    // Intakes are as-fed pounds while the limit is dry-matter based, so
    // each feed counts at its dry-matter fraction here.
    constraints.push(constraint!(dry_matter_lbs <= dmi_limit));
    if policy.exact_dmi {
        constraints.push(constraint!(total_intake == dmi_limit));
    } else {
        constraints.push(constraint!(total_intake <= dmi_limit));
    }

    Ok(RationModel {
        vars,
        objective,
        constraints,
        forage_var,
        feed_vars,
        block_vars,
    })
}

fn unsolved(status: SolveStatus) -> SolvedRation {
    SolvedRation {
        status,
        intakes: Vec::new(),
        forage_intake: 0.0,
        block_used: Vec::new(),
        objective_value: 0.0,
    }
}

/// Solves a built ration model.
///
/// One deterministic solve per call, no retries. A model without block
/// indicators is a pure LP and goes through the same path. The returned
/// status discriminates optimal, infeasible, and unbounded outcomes; any
/// other solver failure is reported as [`SolveStatus::NotSolved`].
pub fn solve_ration(model: RationModel) -> SolvedRation {
    let RationModel {
        vars,
        objective,
        constraints,
        forage_var,
        feed_vars,
        block_vars,
    } = model;

    let mut problem = vars.minimise(objective).using(default_solver);
    for c in constraints {
        problem.add_constraint(c);
    }

    match problem.solve() {
        Ok(solution) => {
            let intakes: Vec<(String, f64)> = feed_vars
                .iter()
                .map(|fv| (fv.name.clone(), solution.value(fv.var)))
                .collect();
            let objective_value = feed_vars
                .iter()
                .map(|fv| fv.cost_per_lb * solution.value(fv.var))
                .sum();
            let block_used = block_vars
                .iter()
                .map(|(name, used)| (name.clone(), solution.value(*used)))
                .collect();
            SolvedRation {
                status: SolveStatus::Optimal,
                intakes,
                forage_intake: solution.value(forage_var),
                block_used,
                objective_value,
            }
        }
        Err(ResolutionError::Infeasible) => unsolved(SolveStatus::Infeasible),
        Err(ResolutionError::Unbounded) => unsolved(SolveStatus::Unbounded),
        Err(_) => unsolved(SolveStatus::NotSolved),
    }
}

/// Interprets an optimal solve into the structured feeding report.
///
/// Pure arithmetic on the solved values; nothing here talks to the solver.
/// Nutrients are recomputed from the intakes as a post-hoc check, the herd
/// projection scales per-head figures by the stocking rate, and the pasture
/// duration divides standing dry matter by daily herd consumption. A herd
/// that eats no forage gets an infinite duration rather than a division
/// error; supplement totals for an infinite stay are reported as zero when
/// the daily amount is zero.
///
/// Returns `None` unless the solve was optimal.
pub fn summarize_ration(
    solved: &SolvedRation,
    stage: &NutritionStage,
    forage: &ForageStage,
    pasture: &PastureContext,
    feeds: &[Feed],
) -> Option<RationReport> {
    if solved.status != SolveStatus::Optimal {
        return None;
    }

    let total_supplement = solved.total_supplement();
    let total_intake = solved.forage_intake + total_supplement;

    let mut protein_lbs = solved.forage_intake * forage.protein_pct / 100.0;
    let mut tdn_lbs = solved.forage_intake * forage.tdn_pct / 100.0;
    for feed in feeds {
        if let Some(amount) = solved.intake(&feed.name) {
            protein_lbs += amount * feed.protein_pct / 100.0;
            tdn_lbs += amount * feed.tdn_pct / 100.0;
        }
    }
    let pct_of_total = |lbs: f64| {
        if total_intake > 0.0 {
            lbs / total_intake * 100.0
        } else {
            0.0
        }
    };

    let daily_herd_forage = solved.forage_intake * pasture.stocking_rate;
    let standing_dry_matter = pasture.standing_dry_matter(forage);
    let days_on_pasture = if daily_herd_forage > 0.0 {
        standing_dry_matter / daily_herd_forage
    } else {
        f64::INFINITY
    };
    // Avoids 0 * inf when a zero daily amount meets an unlimited stay.
    let over_duration = |daily: f64| {
        if daily > 0.0 {
            daily * days_on_pasture
        } else {
            0.0
        }
    };

    let mut feed_plan = Vec::new();
    for feed in feeds {
        if let Some(amount) = solved.intake(&feed.name) {
            if amount <= USED_FEED_EPS {
                continue;
            }
            let daily_herd_amount = amount * pasture.stocking_rate;
            let total_amount = over_duration(daily_herd_amount);
            feed_plan.push(FeedPlanEntry {
                name: feed.name.clone(),
                daily_intake: amount,
                daily_herd_amount,
                total_amount,
                total_cost: feed.cost_per_lb * total_amount,
            });
        }
    }

    let daily_herd_supplement = total_supplement * pasture.stocking_rate;
    let daily_herd_cost = solved.objective_value * pasture.stocking_rate;

    Some(RationReport {
        stage_name: stage.name.clone(),
        forage_name: forage.name.clone(),
        dmi_limit: stage.dm_intake,
        forage_intake: solved.forage_intake,
        total_supplement,
        total_intake,
        feed_plan,
        nutrition: NutrientAnalysis {
            protein_lbs,
            protein_pct: pct_of_total(protein_lbs),
            protein_required_lbs: stage.protein_required_lbs(),
            protein_required_pct: stage.protein_pct,
            tdn_lbs,
            tdn_pct: pct_of_total(tdn_lbs),
            tdn_required_lbs: stage.tdn_required_lbs(),
            tdn_required_pct: stage.tdn_pct,
        },
        pasture: PastureAnalysis {
            stocking_rate: pasture.stocking_rate,
            standing_dry_matter,
            daily_herd_forage,
            days_on_pasture,
        },
        supply: SupplyPlan {
            daily_supplement_per_head: total_supplement,
            daily_herd_supplement,
            total_supplement_needed: over_duration(daily_herd_supplement),
        },
        cost: CostAnalysis {
            daily_cost_per_head: solved.objective_value,
            daily_herd_cost,
            total_grazing_cost: over_duration(daily_herd_cost),
        },
    })
}
