//! Display and formatting utilities for Ovimax.
//!
//! This module renders the structured ration report to stdout in a
//! readable format. The report record itself carries no text; everything
//! here is presentation.

use crate::models::{RationReport, SolveStatus};

/// Formats a pasture duration in days.
///
/// An infinite duration (the herd eats no forage) renders as "unlimited".
///
/// # Example
///
/// ```
/// use ovimax::display::format_days;
///
/// assert_eq!(format_days(12.34), "12.3 days");
/// assert_eq!(format_days(f64::INFINITY), "unlimited");
/// ```
pub fn format_days(days: f64) -> String {
    if days.is_finite() {
        format!("{:.1} days", days)
    } else {
        "unlimited".to_string()
    }
}

/// Formats a dollar amount.
///
/// Totals taken over an unlimited grazing period are not finite and render
/// as "n/a".
pub fn format_money(amount: f64) -> String {
    if amount.is_finite() {
        format!("${:.2}", amount)
    } else {
        "n/a".to_string()
    }
}

/// Formats a weight in pounds.
pub fn format_lbs(amount: f64) -> String {
    if amount.is_finite() {
        format!("{:.2} lbs", amount)
    } else {
        "n/a".to_string()
    }
}

/// Displays the complete ration report to stdout.
///
/// Prints the per-head feeding plan, the nutritional analysis against the
/// stage requirements, supplement purchase requirements, the pasture
/// duration analysis, and the cost breakdown.
pub fn display_report(report: &RationReport) {
    println!();
    println!("+================================================================+");
    println!("|               OVIMAX RATION OPTIMIZATION RESULTS               |");
    println!("+================================================================+");
    println!();
    println!(
        "Stage: {}   Forage: {}",
        report.stage_name, report.forage_name
    );

    println!();
    println!("[FEED PLAN] (per sheep per day)");
    println!("----------------------------------------------------------------");
    println!("  {:<32} {:>10.2} lbs", "Forage", report.forage_intake);
    for entry in &report.feed_plan {
        println!("  {:<32} {:>10.2} lbs", entry.name, entry.daily_intake);
    }
    println!();
    println!("  Total feed consumption: {:.2} lbs", report.total_intake);
    println!("  Total supplement:       {:.2} lbs", report.total_supplement);
    println!("  DMI limit:              {:.2} lbs", report.dmi_limit);

    let nutrition = &report.nutrition;
    println!();
    println!("[NUTRITIONAL ANALYSIS]");
    println!("----------------------------------------------------------------");
    println!(
        "  Protein:          {:.2} lbs ({:.2}%)",
        nutrition.protein_lbs, nutrition.protein_pct
    );
    println!(
        "  Required protein: {:.2} lbs ({:.2}%)",
        nutrition.protein_required_lbs, nutrition.protein_required_pct
    );
    println!(
        "  TDN:              {:.2} lbs ({:.2}%)",
        nutrition.tdn_lbs, nutrition.tdn_pct
    );
    println!(
        "  Required TDN:     {:.2} lbs ({:.2}%)",
        nutrition.tdn_required_lbs, nutrition.tdn_required_pct
    );

    let supply = &report.supply;
    let pasture = &report.pasture;
    println!();
    println!("[SUPPLEMENT REQUIREMENTS]");
    println!("----------------------------------------------------------------");
    println!(
        "  Daily supplement per sheep:      {:.2} lbs",
        supply.daily_supplement_per_head
    );
    println!(
        "  Daily supplement for all sheep:  {:.2} lbs",
        supply.daily_herd_supplement
    );
    println!(
        "  Total needed for {}:  {}",
        format_days(pasture.days_on_pasture),
        format_lbs(supply.total_supplement_needed)
    );
    if !report.feed_plan.is_empty() {
        println!();
        println!(
            "  {:<32} {:>12} {:>12} {:>10}",
            "Feed", "Herd lbs/day", "Total lbs", "Cost"
        );
        println!("  --------------------------------------------------------------");
        for entry in &report.feed_plan {
            println!(
                "  {:<32} {:>12.2} {:>12} {:>10}",
                entry.name,
                entry.daily_herd_amount,
                if entry.total_amount.is_finite() {
                    format!("{:.2}", entry.total_amount)
                } else {
                    "n/a".to_string()
                },
                format_money(entry.total_cost)
            );
        }
    }

    println!();
    println!("[PASTURE DURATION]");
    println!("----------------------------------------------------------------");
    println!("  Sheep per acre:                  {:.0}", pasture.stocking_rate);
    println!(
        "  Total forage available:          {:.2} lbs DM",
        pasture.standing_dry_matter
    );
    println!(
        "  Daily forage consumption (herd): {:.2} lbs DM",
        pasture.daily_herd_forage
    );
    println!(
        "  Days pasture will last:          {}",
        format_days(pasture.days_on_pasture)
    );

    let cost = &report.cost;
    println!();
    println!("[COST ANALYSIS]");
    println!("----------------------------------------------------------------");
    println!(
        "  Feed cost per sheep per day:  {}",
        format_money(cost.daily_cost_per_head)
    );
    println!(
        "  Feed cost for herd per day:   {}",
        format_money(cost.daily_herd_cost)
    );
    println!(
        "  Total cost for {}:  {}",
        format_days(pasture.days_on_pasture),
        format_money(cost.total_grazing_cost)
    );
    println!();
}

/// Reports a non-optimal solve outcome.
///
/// These are terminal results, not retryable errors; the message says what
/// the status means for the operator.
pub fn display_failure(status: SolveStatus) {
    println!();
    match status {
        SolveStatus::Infeasible => {
            println!("[WARNING] The ration model is infeasible.");
            println!("No feed combination satisfies the nutritional and intake");
            println!("constraints. Review the feed table, pasture availability, and");
            println!("the selected stage's requirements.");
        }
        SolveStatus::Unbounded => {
            println!("[WARNING] The ration model is unbounded.");
            println!("The cost can decrease without limit; check the feed table for");
            println!("a negative cost entry.");
        }
        SolveStatus::NotSolved => {
            println!("[WARNING] The solver failed before reaching a verdict.");
        }
        SolveStatus::Optimal => {}
    }
}
