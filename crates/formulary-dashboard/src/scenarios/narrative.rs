//! Scenario 4: Narrative normalization
//!
//! Prepares the research narrative of one medication and one category:
//! structural repair, block rendering, and evidence checklist
//! consolidation. Also shows the not-found path for a stale medication id.

use formulary_contracts::error::FormularyResult;
use formulary_core::traits::ResourceStore;
use formulary_narrative::{PreparedNarrative, RenderedDocument};

use crate::session::DashboardSession;

/// Medication whose narrative the scenario prepares.
const MEDICATION_ID: i64 = 101;
const STALE_MEDICATION_ID: i64 = 999;
const CATEGORY_CODE: &str = "N02BE";

pub async fn run_scenario<S: ResourceStore>(session: &DashboardSession<S>) -> FormularyResult<()> {
    println!("=== Scenario 4: Narrative Normalization ===");
    println!();

    let detail = session.medication_detail(MEDICATION_ID).await?;
    println!("  Medication {} ({})", detail.id, detail.name);
    let connections: Vec<&str> = detail
        .natural_connection
        .present()
        .into_iter()
        .map(|c| c.label())
        .collect();
    if !connections.is_empty() {
        println!("  Natural connection: {}", connections.join(", "));
    }

    if let Some(raw) = &detail.full_report {
        println!();
        println!("  Repaired text:");
        for line in session.normalize_for_display(raw).lines() {
            println!("    | {}", line);
        }
    }

    match session.medication_narrative(MEDICATION_ID).await? {
        Some(prepared) => print_prepared(&prepared),
        None => println!("  (no narrative)"),
    }

    println!("  Category {}:", CATEGORY_CODE);
    match session.category_narrative(CATEGORY_CODE).await? {
        Some(prepared) => print_prepared(&prepared),
        None => println!("  (no narrative)"),
    }

    match session.medication_detail(STALE_MEDICATION_ID).await {
        Ok(detail) => println!("  Unexpected detail for {}", detail.id),
        Err(e) if e.is_not_found() => println!("  Stale reference: {}", e),
        Err(e) => return Err(e),
    }

    println!();
    Ok(())
}

fn print_prepared(prepared: &PreparedNarrative<RenderedDocument>) {
    println!();
    match &prepared.checklist {
        Some(checklist) => {
            println!(
                "  Checklist: {} of {} categories present",
                checklist.checked_count(),
                checklist.items.len()
            );
            for item in &checklist.items {
                let mark = if item.checked { "[x]" } else { "[ ]" };
                println!("    {} {}", mark, item.label);
            }
        }
        None => println!("  Checklist: none"),
    }
    println!();
    println!("  Markup:");
    for line in prepared.document.to_markup().lines() {
        println!("    {}", line);
    }
    println!();
}
