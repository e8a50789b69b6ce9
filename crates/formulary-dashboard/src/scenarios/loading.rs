//! Scenario 5: Lazy resource loading
//!
//! Prints slot states before any request, issues two category drill-downs
//! concurrently so they share one report fetch, then prints the slot states
//! with entry counts and fingerprints.

use formulary_contracts::error::FormularyResult;
use formulary_core::{traits::ResourceStore, SlotStatus};

use crate::session::DashboardSession;

pub async fn run_scenario<S: ResourceStore>(session: &DashboardSession<S>) -> FormularyResult<()> {
    println!("=== Scenario 5: Lazy Resource Loading ===");
    println!("  Session: {}", session.id());
    println!();

    print_status(&session.resource_status());

    let (first, second) = tokio::join!(
        session.category_drilldown("N02BE"),
        session.category_drilldown("B03AA"),
    );
    println!(
        "  Concurrent drill-downs: N02BE -> {} medication(s), B03AA -> {} medication(s)",
        first?.medication_count(),
        second?.medication_count()
    );
    println!();

    print_status(&session.resource_status());
    println!();
    Ok(())
}

fn print_status(statuses: &[SlotStatus]) {
    for status in statuses {
        let fingerprint = status
            .fingerprint
            .as_deref()
            .map(|f| &f[..f.len().min(12)])
            .unwrap_or("-");
        let entries = status
            .entries
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<18} {:<10} entries={:<4} sha256={}",
            status.resource.to_string(),
            status.state.to_string(),
            entries,
            fingerprint
        );
    }
}
