//! # Ovimax
//!
//! A command-line tool and library for computing minimum-cost daily feed
//! rations for a sheep herd on pasture.
//!
//! This crate builds a small linear program (mixed-integer when block
//! supplements are in play) from:
//!
//! - Nutritional requirements by production stage (dry-matter intake limit,
//!   TDN, protein)
//! - Forage quality by maturity stage
//! - Pasture availability and stocking rate
//! - A supplement feed table with costs, intake limits, and block flags
//!
//! solves it, and interprets the optimal intakes into a herd-scale feeding
//! and pasture-duration report.
//!
//! ## Modules
//!
//! - [`models`] - Core data structures for stages, feeds, policies, and reports
//! - [`data`] - Built-in reference tables and CSV feed-table loading
//! - [`optimizer`] - Bound derivation, model building, solving, interpretation
//! - [`display`] - Output formatting and display utilities
//!
//! ## Example Usage
//!
//! ```no_run
//! use ovimax::{
//!     data::{default_feeds, lookup_forage, lookup_stage},
//!     display::display_report,
//!     models::{PastureContext, RationPolicy},
//!     optimizer::{build_ration_model, solve_ration, summarize_ration},
//! };
//!
//! // Select reference data
//! let stage = lookup_stage("Last_4_Weeks_Gestation").unwrap();
//! let forage = lookup_forage("Dry").unwrap();
//! let pasture = PastureContext {
//!     available_forage_per_acre: 2000.0,
//!     stocking_rate: 90.0,
//! };
//! let feeds = default_feeds();
//!
//! // Build, solve, and report
//! let model = build_ration_model(&stage, &forage, &pasture, &feeds, RationPolicy::default())
//!     .expect("valid configuration");
//! let solved = solve_ration(model);
//! if let Some(report) = summarize_ration(&solved, &stage, &forage, &pasture, &feeds) {
//!     display_report(&report);
//! }
//! ```
//!
//! ## Model Features
//!
//! Optional model features are selected through [`models::RationPolicy`]:
//!
//! 1. **Exact DMI** (default): total intake is pinned to the stage's
//!    dry-matter-intake limit, so percentage-based reporting is
//!    self-consistent.
//!
//! 2. **Block exclusivity** (default): at most one self-fed block
//!    supplement may carry intake, enforced with binary indicators.
//!
//! 3. **Minimum forage** (default): the ration must use at least half the
//!    DMI limit as forage, degraded gracefully when pasture is scarce.

pub mod data;
pub mod display;
pub mod models;
pub mod optimizer;
