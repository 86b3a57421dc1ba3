//! Reference tables and data loading for Ovimax.
//!
//! This module holds the built-in nutrition-stage and forage-quality tables,
//! the default supplement table, and CSV loading for user-supplied feed
//! tables. The built-in tables are fixed reference data for a 154 lb ewe;
//! feeds are the part users most often edit, so they can also be loaded
//! from a CSV file.

use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use crate::models::{Feed, FeedRow, ForageStage, NutritionStage};

fn stage(
    name: &str,
    weeks: u32,
    dm_intake: f64,
    tdn_lbs: f64,
    protein_lbs: f64,
    tdn_pct: f64,
    protein_pct: f64,
) -> NutritionStage {
    NutritionStage {
        name: name.to_string(),
        weeks,
        dm_intake,
        tdn_lbs,
        protein_lbs,
        tdn_pct,
        protein_pct,
    }
}

fn forage(name: &str, protein_pct: f64, fiber_pct: f64, tdn_pct: f64, dm_pct: f64) -> ForageStage {
    ForageStage {
        name: name.to_string(),
        protein_pct,
        fiber_pct,
        tdn_pct,
        dm_pct,
    }
}

fn feed(
    name: &str,
    cost_per_lb: f64,
    protein_pct: f64,
    tdn_pct: f64,
    dm_pct: f64,
    min_intake: f64,
    max_intake: f64,
    is_block: bool,
) -> Feed {
    Feed {
        name: name.to_string(),
        cost_per_lb,
        protein_pct,
        tdn_pct,
        dm_pct,
        min_intake,
        max_intake,
        is_block,
        protein_capped: false,
    }
}

/// Nutritional requirements by production stage for a 154 lb ewe.
///
/// Columns: weeks in stage, daily dry-matter intake limit (lbs), TDN (lbs),
/// protein (lbs), TDN %, protein %.
pub fn nutrition_stages() -> Vec<NutritionStage> {
    vec![
        stage("Maintenance_Single", 16, 2.6, 1.5, 0.25, 57.69, 9.62),
        stage("Maintenance_Twin", 14, 2.6, 1.5, 0.25, 57.69, 9.62),
        stage("Flushing", 5, 4.0, 2.3, 0.36, 57.50, 9.00),
        stage("Nonlactating", 15, 3.1, 1.7, 0.29, 54.84, 9.35),
        stage("Last_4_Weeks_Gestation", 4, 4.0, 2.3, 0.42, 57.50, 10.50),
        stage("First_6_Weeks_Lactation_Single", 8, 5.5, 3.6, 0.73, 65.45, 13.27),
        stage("First_6_Weeks_Lactation_Twin", 8, 6.2, 4.0, 0.92, 64.52, 14.84),
    ]
}

/// Forage quality by maturity stage.
///
/// Early vegetative forage is mostly water (25% dry matter); dry and
/// leached forage is nearly all dry matter but nutritionally poor.
pub fn forage_stages() -> Vec<ForageStage> {
    vec![
        forage("Early_vegetative", 18.0, 24.0, 60.0, 25.0),
        forage("Late_vegetative", 15.0, 25.0, 58.0, 30.0),
        forage("Early_flowering", 15.0, 26.0, 56.0, 35.0),
        forage("Late_flowering", 10.0, 29.0, 50.0, 45.0),
        forage("Mature", 6.0, 33.0, 40.0, 75.0),
        forage("Dry", 5.0, 34.0, 34.0, 90.0),
        forage("Dry_leached", 3.0, 35.0, 30.0, 92.0),
    ]
}

/// Looks up a nutrition stage by name.
pub fn lookup_stage(name: &str) -> Option<NutritionStage> {
    nutrition_stages().into_iter().find(|s| s.name == name)
}

/// Looks up a forage maturity stage by name.
pub fn lookup_forage(name: &str) -> Option<ForageStage> {
    forage_stages().into_iter().find(|f| f.name == name)
}

/// Names of all nutrition stages, for listing valid choices.
pub fn stage_names() -> Vec<String> {
    nutrition_stages().into_iter().map(|s| s.name).collect()
}

/// Names of all forage maturity stages, for listing valid choices.
pub fn forage_names() -> Vec<String> {
    forage_stages().into_iter().map(|f| f.name).collect()
}

/// The built-in supplement table.
///
/// Feed-mill commodities are priced per pound; feed-store products are
/// priced per bag, block, or tub. The range pellet's intake ceiling is not
/// declared here; it is derived from the one-third-protein rule when the
/// model is built.
pub fn default_feeds() -> Vec<Feed> {
    let mut feeds = vec![
        // Feed mill supplements
        feed("Corn", 0.25, 9.0, 90.0, 88.0, 0.0, 3.0, false),
        feed("Soybean_Meal", 0.30, 44.0, 80.0, 89.0, 0.0, 2.0, false),
        feed("Wheat_Middlings", 0.13, 16.0, 77.0, 89.0, 0.0, 2.5, false),
        feed("Molasses", 0.20, 4.0, 75.0, 75.0, 0.05, 0.5, false),
        feed("Limestone", 0.05, 0.0, 0.0, 99.0, 0.0, 0.1, false),
        // Feed store supplements
        feed("Purina_Accuration", 129.99 / 200.0, 25.0, 85.0, 90.0, 0.0, 1.0, true),
        feed("Cascade_Pellets", 11.49 / 50.0, 14.5, 68.0, 90.0, 0.0, 2.0, false),
        feed("Purina_Stocker_Grower", 17.99 / 50.0, 14.0, 68.0, 90.0, 0.0, 2.0, false),
        feed("Accuration_Block_Concord", 129.99 / 200.0, 25.0, 85.0, 96.0, 0.0, 1.0, true),
        feed("Rangeland_Tub_Wilco", 104.99 / 125.0, 23.0, 85.0, 96.0, 0.0, 1.0, true),
        feed("Accuration_Block_Wilco", 149.99 / 200.0, 25.0, 85.0, 96.0, 0.0, 1.0, true),
        feed("Rangeland_Allstock_Tub", 99.99 / 125.0, 15.0, 85.0, 96.0, 0.0, 1.0, true),
    ];

    // Range pellet: ceiling derived from the one-third-protein rule
    let mut range_pellet = feed(
        "Purina_Accuration_Range_Pellet",
        14.50 / 50.0,
        33.0,
        85.0,
        90.0,
        0.0,
        f64::INFINITY,
        true,
    );
    range_pellet.protein_capped = true;
    feeds.push(range_pellet);

    feeds
}

/// Loads a feed table from a CSV file.
///
/// # Arguments
///
/// * `path` - Path to the feed CSV file
///
/// # Returns
///
/// A vector of [`Feed`] records, or an error if the file cannot be read or
/// parsed.
///
/// # CSV Format
///
/// Expected columns: `name, cost_per_lb, protein, tdn, dm, min_intake,
/// max_intake, is_block, protein_capped`. An empty `max_intake` means the
/// feed has no declared ceiling.
pub fn load_feeds(path: &Path) -> Result<Vec<Feed>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut feeds = Vec::new();
    for result in rdr.deserialize() {
        let row: FeedRow = result?;
        feeds.push(Feed {
            name: row.name,
            cost_per_lb: row.cost_per_lb,
            protein_pct: row.protein,
            tdn_pct: row.tdn,
            dm_pct: row.dm,
            min_intake: row.min_intake,
            max_intake: row.max_intake.unwrap_or(f64::INFINITY),
            is_block: row.is_block,
            protein_capped: row.protein_capped,
        });
    }
    Ok(feeds)
}
