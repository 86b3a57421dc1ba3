//! Data models and structures for Ovimax.
//!
//! This module contains all the core data structures used throughout the
//! application: nutrition and forage reference records, feed definitions,
//! pasture parameters, ration policies, solver results, and the structured
//! feeding report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nutritional requirements for one production stage of a 154 lb ewe.
///
/// Each stage carries the daily dry-matter intake limit together with the
/// TDN and protein requirements, both in pounds per day and as a percentage
/// of the intake limit.
///
/// # Example
///
/// ```
/// use ovimax::models::NutritionStage;
///
/// let flushing = NutritionStage {
///     name: "Flushing".to_string(),
///     weeks: 5,
///     dm_intake: 4.0,
///     tdn_lbs: 2.3,
///     protein_lbs: 0.36,
///     tdn_pct: 57.50,
///     protein_pct: 9.00,
/// };
///
/// assert_eq!(flushing.protein_required_lbs(), 0.36);
/// ```
#[derive(Debug, Clone)]
pub struct NutritionStage {
    /// Stage name (e.g., "Flushing", "Last_4_Weeks_Gestation")
    pub name: String,
    /// Duration of the stage in weeks
    pub weeks: u32,
    /// Maximum dry-matter intake in lbs/day
    pub dm_intake: f64,
    /// Required TDN in lbs/day
    pub tdn_lbs: f64,
    /// Required protein in lbs/day
    pub protein_lbs: f64,
    /// Required TDN as a percentage of the intake limit
    pub tdn_pct: f64,
    /// Required protein as a percentage of the intake limit
    pub protein_pct: f64,
}

impl NutritionStage {
    /// Protein requirement in lbs/day, derived from the percentage and the
    /// intake limit.
    pub fn protein_required_lbs(&self) -> f64 {
        self.protein_pct / 100.0 * self.dm_intake
    }

    /// TDN requirement in lbs/day, derived from the percentage and the
    /// intake limit.
    pub fn tdn_required_lbs(&self) -> f64 {
        self.tdn_pct / 100.0 * self.dm_intake
    }
}

/// Forage quality characteristics at one maturity stage.
///
/// Nutrient percentages are on a dry-matter basis; `dm_pct` is the
/// dry-matter fraction of the standing forage itself.
#[derive(Debug, Clone)]
pub struct ForageStage {
    /// Maturity class name (e.g., "Early_vegetative", "Dry")
    pub name: String,
    /// Crude protein percentage
    pub protein_pct: f64,
    /// Fiber percentage
    pub fiber_pct: f64,
    /// Total digestible nutrients percentage
    pub tdn_pct: f64,
    /// Dry-matter percentage of the standing forage
    pub dm_pct: f64,
}

/// A purchasable supplement feed.
///
/// Costs are per as-fed pound; nutrient percentages describe the feed as
/// analyzed. Block feeds (lick tubs and pressed blocks) are mutually
/// exclusive when the block-exclusivity policy is active.
///
/// # Example
///
/// ```
/// use ovimax::models::Feed;
///
/// let corn = Feed {
///     name: "Corn".to_string(),
///     cost_per_lb: 0.25,
///     protein_pct: 9.0,
///     tdn_pct: 90.0,
///     dm_pct: 88.0,
///     min_intake: 0.0,
///     max_intake: 3.0,
///     is_block: false,
///     protein_capped: false,
/// };
///
/// assert!(!corn.is_block);
/// ```
#[derive(Debug, Clone)]
pub struct Feed {
    /// Feed name (e.g., "Corn", "Soybean_Meal")
    pub name: String,
    /// Cost in dollars per as-fed pound
    pub cost_per_lb: f64,
    /// Crude protein percentage
    pub protein_pct: f64,
    /// Total digestible nutrients percentage
    pub tdn_pct: f64,
    /// Dry-matter percentage
    pub dm_pct: f64,
    /// Minimum daily intake in lbs (0 for optional feeds)
    pub min_intake: f64,
    /// Maximum daily intake in lbs (`f64::INFINITY` when unbounded)
    pub max_intake: f64,
    /// Whether this is a self-fed block/tub supplement
    pub is_block: bool,
    /// Whether the intake ceiling is derived from the one-third-protein
    /// rule instead of the declared maximum
    pub protein_capped: bool,
}

/// Standing pasture parameters.
#[derive(Debug, Clone)]
pub struct PastureContext {
    /// Available forage in lbs per acre
    pub available_forage_per_acre: f64,
    /// Stocking rate in sheep per acre
    pub stocking_rate: f64,
}

impl PastureContext {
    /// Standing forage dry matter in lbs.
    pub fn standing_dry_matter(&self, forage: &ForageStage) -> f64 {
        self.available_forage_per_acre * forage.dm_pct / 100.0
    }
}

/// Policy flags selecting which optional model features are active.
///
/// The defaults reproduce the full model: total intake pinned to the DMI
/// limit, at most one block feed in the ration, and a minimum forage
/// utilization floor.
///
/// # Example
///
/// ```
/// use ovimax::models::RationPolicy;
///
/// let policy = RationPolicy::default();
/// assert!(policy.exact_dmi);
/// assert!(policy.block_exclusive);
/// assert!(policy.min_forage);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RationPolicy {
    /// Pin total intake to the stage DMI limit (`==`) instead of only
    /// bounding it above (`<=`). Percentage-based reporting is only
    /// self-consistent when the total is pinned.
    pub exact_dmi: bool,
    /// Allow at most one block feed to carry positive intake.
    pub block_exclusive: bool,
    /// Require forage intake of at least half the DMI limit, degraded to
    /// the forage upper bound when pasture is scarce.
    pub min_forage: bool,
}

impl Default for RationPolicy {
    fn default() -> Self {
        RationPolicy {
            exact_dmi: true,
            block_exclusive: true,
            min_forage: true,
        }
    }
}

/// Terminal status of one solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    /// An optimal ration was found
    Optimal,
    /// The constraint set cannot be satisfied
    Infeasible,
    /// The objective is unbounded; only possible through misconfiguration
    /// such as a negative-cost feed
    Unbounded,
    /// The solver failed before reaching a verdict
    NotSolved,
}

/// Solved variable values for one ration model.
///
/// Intakes and the objective value are only meaningful when `status` is
/// [`SolveStatus::Optimal`]; for any other status the intake list is empty.
#[derive(Debug, Clone)]
pub struct SolvedRation {
    /// Terminal solver status
    pub status: SolveStatus,
    /// Solved intake in lbs/day for each supplement, in feed-table order
    pub intakes: Vec<(String, f64)>,
    /// Solved forage intake in lbs/day
    pub forage_intake: f64,
    /// Solved block-indicator values (1 = block in use), present only when
    /// the block-exclusivity policy was active
    pub block_used: Vec<(String, f64)>,
    /// Daily supplement cost per head in dollars
    pub objective_value: f64,
}

impl SolvedRation {
    /// Looks up the solved intake for a feed by name.
    pub fn intake(&self, name: &str) -> Option<f64> {
        self.intakes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, amount)| *amount)
    }

    /// Sum of all supplement intakes in lbs/day (forage excluded).
    pub fn total_supplement(&self) -> f64 {
        self.intakes.iter().map(|(_, amount)| amount).sum()
    }
}

/// One row of the feeding plan: a feed that carries positive intake in the
/// optimal ration, scaled to the herd and to the pasture duration.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPlanEntry {
    /// Feed name
    pub name: String,
    /// Intake in lbs per head per day
    pub daily_intake: f64,
    /// Amount in lbs per day for the whole stocking
    pub daily_herd_amount: f64,
    /// Total lbs needed over the pasture duration
    pub total_amount: f64,
    /// Total cost in dollars over the pasture duration
    pub total_cost: f64,
}

/// Recomputed nutrient delivery versus requirements.
///
/// Delivered percentages are of total daily intake; required percentages
/// are the stage table values.
#[derive(Debug, Clone, Serialize)]
pub struct NutrientAnalysis {
    /// Protein delivered in lbs/day
    pub protein_lbs: f64,
    /// Protein delivered as a percentage of total intake
    pub protein_pct: f64,
    /// Protein required in lbs/day
    pub protein_required_lbs: f64,
    /// Protein required as a percentage of the intake limit
    pub protein_required_pct: f64,
    /// TDN delivered in lbs/day
    pub tdn_lbs: f64,
    /// TDN delivered as a percentage of total intake
    pub tdn_pct: f64,
    /// TDN required in lbs/day
    pub tdn_required_lbs: f64,
    /// TDN required as a percentage of the intake limit
    pub tdn_required_pct: f64,
}

/// Herd-scale pasture consumption and duration.
#[derive(Debug, Clone, Serialize)]
pub struct PastureAnalysis {
    /// Stocking rate in sheep per acre
    pub stocking_rate: f64,
    /// Standing forage dry matter in lbs
    pub standing_dry_matter: f64,
    /// Daily forage dry matter consumed by the whole stocking in lbs
    pub daily_herd_forage: f64,
    /// Days the pasture will last; `f64::INFINITY` when no forage is
    /// consumed
    pub days_on_pasture: f64,
}

/// Supplement quantities needed over the grazing period.
#[derive(Debug, Clone, Serialize)]
pub struct SupplyPlan {
    /// Supplement in lbs per head per day
    pub daily_supplement_per_head: f64,
    /// Supplement in lbs per day for the whole stocking
    pub daily_herd_supplement: f64,
    /// Total supplement in lbs over the pasture duration
    pub total_supplement_needed: f64,
}

/// Feed cost at head, herd, and grazing-period scale.
#[derive(Debug, Clone, Serialize)]
pub struct CostAnalysis {
    /// Dollars per head per day
    pub daily_cost_per_head: f64,
    /// Dollars per day for the whole stocking
    pub daily_herd_cost: f64,
    /// Dollars over the pasture duration
    pub total_grazing_cost: f64,
}

/// The structured ration report produced from an optimal solve.
///
/// This is a plain data record; rendering (console text, JSON) is the
/// presentation layer's job.
#[derive(Debug, Clone, Serialize)]
pub struct RationReport {
    /// Nutrition stage the ration was balanced for
    pub stage_name: String,
    /// Forage maturity stage grazed
    pub forage_name: String,
    /// Daily dry-matter intake limit in lbs
    pub dmi_limit: f64,
    /// Forage intake in lbs per head per day
    pub forage_intake: f64,
    /// Supplement intake in lbs per head per day
    pub total_supplement: f64,
    /// Total feed intake in lbs per head per day
    pub total_intake: f64,
    /// Feeds carrying positive intake, with herd and duration scaling
    pub feed_plan: Vec<FeedPlanEntry>,
    /// Nutrient delivery versus requirements
    pub nutrition: NutrientAnalysis,
    /// Pasture consumption and duration
    pub pasture: PastureAnalysis,
    /// Supplement supply planning
    pub supply: SupplyPlan,
    /// Cost breakdown
    pub cost: CostAnalysis,
}

/// Errors detected while assembling the optimization inputs.
///
/// All of these fail before a model is built; nothing here reaches the
/// solver.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested nutrition stage is not in the table
    #[error("unknown nutrition stage '{0}'")]
    UnknownStage(String),
    /// The requested forage maturity stage is not in the table
    #[error("unknown forage stage '{0}'")]
    UnknownForage(String),
    /// Per-head forage shares are undefined without a positive stocking rate
    #[error("stocking rate must be positive (got {0})")]
    InvalidStockingRate(f64),
    /// A feed's minimum intake exceeds its (possibly derived) maximum
    #[error("feed '{name}': minimum intake {min} exceeds maximum intake {max}")]
    IntakeBounds {
        /// Feed name
        name: String,
        /// Declared minimum intake
        min: f64,
        /// Effective maximum intake
        max: f64,
    },
    /// The block linking constraint needs a finite maximum intake
    #[error("block feed '{name}' has no finite maximum intake")]
    UnboundedBlockFeed {
        /// Feed name
        name: String,
    },
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for the feed table.
#[derive(Debug, Deserialize)]
pub struct FeedRow {
    /// Feed name
    pub name: String,
    /// Cost in dollars per pound
    pub cost_per_lb: f64,
    /// Crude protein percentage
    pub protein: f64,
    /// TDN percentage
    pub tdn: f64,
    /// Dry-matter percentage
    pub dm: f64,
    /// Minimum daily intake in lbs
    pub min_intake: f64,
    /// Maximum daily intake in lbs (empty = unbounded)
    pub max_intake: Option<f64>,
    /// Whether this is a block/tub supplement
    pub is_block: bool,
    /// Whether the ceiling is derived from the one-third-protein rule
    pub protein_capped: bool,
}
