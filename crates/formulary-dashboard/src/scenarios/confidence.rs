//! Scenario 1: Classification confidence
//!
//! Resolves the mapping annotation for every medication in the snapshot and
//! prints the badge, explanation and mapping panel a detail view would show.
//! High-confidence mappings print without annotation.

use formulary_contracts::error::FormularyResult;
use formulary_core::traits::ResourceStore;

use crate::session::DashboardSession;

pub async fn run_scenario<S: ResourceStore>(session: &DashboardSession<S>) -> FormularyResult<()> {
    println!("=== Scenario 1: Classification Confidence ===");
    println!();

    let records = session.load_medications().await?;

    for record in records {
        let confidence = session.confidence(record);
        let code = record.leaf_code().unwrap_or("-");
        println!(
            "  {:<28} {:<6} level={:<8} tone={:?}",
            record.name,
            code,
            format!("{:?}", confidence.level),
            confidence.tone
        );

        if let Some(explanation) = &confidence.explanation {
            println!("      {}", explanation);
        }
        if let Some(summary) = session.mapping_summary(record) {
            print!("      [{}]", summary.label);
            if !summary.related_codes.is_empty() {
                print!(" related: {}", summary.related_codes.join(", "));
            }
            println!();
            if let Some(preview) = &summary.notes_preview {
                println!("      notes: {}", preview);
            }
        }
    }

    println!();
    Ok(())
}
