//! Ovimax - Command Line Interface
//!
//! This is the main entry point for the ration optimization tool.
//! Run with `--help` to see all available options.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use ovimax::{
    data::{default_feeds, forage_names, load_feeds, lookup_forage, lookup_stage, stage_names},
    display::{display_failure, display_report},
    models::{ConfigError, PastureContext, RationPolicy},
    optimizer::{build_ration_model, solve_ration, summarize_ration},
};

/// Command-line arguments for Ovimax.
#[derive(Parser, Debug)]
#[command(name = "ovimax")]
#[command(author, version, about = "Compute a minimum-cost daily feed ration for a sheep herd", long_about = None)]
struct Args {
    /// Nutrition stage to balance the ration for
    #[arg(short, long, default_value = "Last_4_Weeks_Gestation")]
    stage: String,

    /// Forage maturity stage on the pasture
    #[arg(short, long, default_value = "Dry")]
    forage: String,

    /// Available forage in lbs per acre
    #[arg(long, default_value = "2000.0")]
    forage_per_acre: f64,

    /// Stocking rate in sheep per acre
    #[arg(long, default_value = "90.0")]
    stocking_rate: f64,

    /// Path to a feed table CSV (defaults to the built-in table)
    #[arg(long)]
    feeds: Option<PathBuf>,

    /// Only bound total intake above instead of pinning it to the DMI limit
    #[arg(long, default_value = "false")]
    dmi_ceiling: bool,

    /// Allow any number of block feeds in the ration
    #[arg(long, default_value = "false")]
    no_block_limit: bool,

    /// Drop the minimum forage utilization rule
    #[arg(long, default_value = "false")]
    no_min_forage: bool,

    /// Emit the report as JSON instead of text
    #[arg(long, default_value = "false")]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let stage = match lookup_stage(&args.stage) {
        Some(stage) => stage,
        None => {
            eprintln!("Error: {}", ConfigError::UnknownStage(args.stage.clone()));
            eprintln!("Valid stages: {}", stage_names().join(", "));
            std::process::exit(1);
        }
    };
    let forage = match lookup_forage(&args.forage) {
        Some(forage) => forage,
        None => {
            eprintln!("Error: {}", ConfigError::UnknownForage(args.forage.clone()));
            eprintln!("Valid forage stages: {}", forage_names().join(", "));
            std::process::exit(1);
        }
    };

    let feeds = match &args.feeds {
        Some(path) => load_feeds(path)?,
        None => default_feeds(),
    };

    let pasture = PastureContext {
        available_forage_per_acre: args.forage_per_acre,
        stocking_rate: args.stocking_rate,
    };
    let policy = RationPolicy {
        exact_dmi: !args.dmi_ceiling,
        block_exclusive: !args.no_block_limit,
        min_forage: !args.no_min_forage,
    };

    if !args.json {
        println!("Ovimax - Sheep Ration Optimizer");
        println!("================================================================");
        println!();
        println!("Configuration:");
        println!(
            "  Stage:   {} ({:.1} lbs DMI, {:.2}% protein, {:.2}% TDN)",
            stage.name, stage.dm_intake, stage.protein_pct, stage.tdn_pct
        );
        println!(
            "  Forage:  {} ({:.0}% protein, {:.0}% TDN, {:.0}% DM)",
            forage.name, forage.protein_pct, forage.tdn_pct, forage.dm_pct
        );
        println!(
            "  Pasture: {:.0} lbs/acre at {:.0} sheep/acre",
            pasture.available_forage_per_acre, pasture.stocking_rate
        );
        println!("  Feeds:   {} supplements", feeds.len());
    }

    let model = build_ration_model(&stage, &forage, &pasture, &feeds, policy)?;
    let solved = solve_ration(model);

    if let Some(report) = summarize_ration(&solved, &stage, &forage, &pasture, &feeds) {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            display_report(&report);
        }
    } else {
        display_failure(solved.status);
    }

    Ok(())
}
