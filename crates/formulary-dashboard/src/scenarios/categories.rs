//! Scenario 3: Category aggregation and drill-down
//!
//! Lists every category report with its live medication count, then drills
//! into a leaf with a full report, a leaf whose report has no narrative, and
//! a leaf with no report at all. Ends with a secondary-taxonomy drill-down.

use formulary_classify::{CategoryDrilldown, StatusGroup};
use formulary_contracts::error::FormularyResult;
use formulary_core::traits::ResourceStore;

use crate::session::DashboardSession;

pub async fn run_scenario<S: ResourceStore>(session: &DashboardSession<S>) -> FormularyResult<()> {
    println!("=== Scenario 3: Category Aggregation ===");
    println!();

    for view in session.category_view().await? {
        println!(
            "  {:<6} {:<36} medications: {}",
            view.report.leaf_code, view.report.leaf_name, view.medication_count
        );
    }
    println!();

    for leaf_code in ["N02BE", "M01AE", "A11CC"] {
        match session.category_drilldown(leaf_code).await? {
            CategoryDrilldown::Report { view, groups } => {
                println!("  {} {}: full report", leaf_code, view.report.leaf_name);
                let profile = view.report.profile.labels();
                if !profile.is_empty() {
                    println!("    profile: {}", profile.join(", "));
                }
                print_groups(&groups);
            }
            CategoryDrilldown::MedicationList {
                leaf_name,
                medication_count,
                groups,
                reason,
                ..
            } => {
                println!(
                    "  {} {}: medication list ({} medication(s), {:?})",
                    leaf_code, leaf_name, medication_count, reason
                );
                print_groups(&groups);
            }
        }
    }
    println!();

    let secondary = session.secondary_drilldown("84:24.12 - Protectants").await?;
    println!(
        "  Secondary category '{}': {} medication(s)",
        secondary.label, secondary.medication_count
    );
    print_groups(&secondary.groups);

    println!();
    Ok(())
}

fn print_groups(groups: &[StatusGroup<'_>]) {
    for group in groups {
        let names: Vec<&str> = group.records.iter().map(|r| r.name.as_str()).collect();
        println!("    {:<28} {}", group.status.label(), names.join(", "));
    }
}
