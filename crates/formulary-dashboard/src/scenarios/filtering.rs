//! Scenario 2: Multi-facet filtering
//!
//! Prints the filter dropdown options, then applies several facet
//! combinations. The last combination shows the secondary facet's
//! containment match selecting two distinct categories.

use formulary_contracts::error::FormularyResult;
use formulary_core::traits::ResourceStore;

use crate::session::DashboardSession;

pub async fn run_scenario<S: ResourceStore>(session: &DashboardSession<S>) -> FormularyResult<()> {
    println!("=== Scenario 2: Multi-facet Filtering ===");
    println!();

    let options = session.filter_options().await?;
    println!("  Primary options:   {}", options.primary.len());
    for option in &options.primary {
        println!("    {}", option.label);
    }
    println!("  Secondary options: {}", options.secondary.len());
    for option in &options.secondary {
        println!("    {}", option.label);
    }
    println!();

    let all = session.config().filters.all_sentinel.as_str();
    let cases: [(&str, &str, &str, &str); 4] = [
        ("no restriction", all, all, all),
        ("allowed only", "ALLOWED", all, all),
        ("allowed anilides", "ALLOWED", "N02BE", all),
        ("label contained in another label", all, all, "Anti-inflammatory Agents"),
    ];

    for (title, status, code, label) in cases {
        let matched = session.filter_view(status, code, label).await?;
        let names: Vec<&str> = matched.iter().map(|r| r.name.as_str()).collect();
        println!("  ({}, {}, {}) {}", status, code, label, title);
        println!("    {} match(es): {}", matched.len(), names.join(", "));
    }

    println!();
    Ok(())
}
