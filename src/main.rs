//! GreenLedger demo
//!
//! Seeds a throwaway ledger with sample entries and prints the aggregate
//! views, as a quick smoke run of the core paths.

use greenledger::factors::SourceCategory;
use greenledger::forecast::{project, Scenario};
use greenledger::ledger::{GuestLedger, LedgerResult, NewEntry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "greenledger=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("GreenLedger v{}", env!("CARGO_PKG_VERSION"));

    let ledger = GuestLedger::in_memory();

    demo_entries(&ledger)?;
    demo_views(&ledger);

    Ok(())
}

fn demo_entries(ledger: &GuestLedger) -> LedgerResult<()> {
    tracing::info!("Recording demo entries...");

    let receipt = ledger.append(
        NewEntry::new(SourceCategory::Electricity)
            .activity("electricity_consumption")
            .amount(420.0)
            .date("2026-07-01"),
    )?;
    tracing::info!("electricity: {} kgCO2e", receipt.emissions_kg_co2e);

    let receipt = ledger.append(
        NewEntry::new(SourceCategory::Fuel)
            .activity("diesel")
            .amount(65.0)
            .date("2026-07-03"),
    )?;
    tracing::info!("fuel: {} kgCO2e", receipt.emissions_kg_co2e);

    let bulk = ledger.append_bulk(vec![
        NewEntry::new(SourceCategory::Transport)
            .activity("delivery_van")
            .amount(180.0)
            .date("2026-07-05"),
        NewEntry::new(SourceCategory::Waste)
            .activity("paper_recycling")
            .amount(25.0)
            .date("2026-07-06"),
        NewEntry::new(SourceCategory::Water)
            .activity("water_supply")
            .amount(12.0)
            .date("2026-07-08"),
    ])?;
    tracing::info!("bulk: {} entries recorded", bulk.count);

    Ok(())
}

fn demo_views(ledger: &GuestLedger) {
    let summary = ledger.summarize();
    tracing::info!(
        "total: {:.4} kgCO2e across {} categories",
        summary.total_emissions,
        summary.by_category.len()
    );
    for row in &summary.by_category {
        tracing::info!("  {}: {:.4} kgCO2e", row.source_category, row.emissions_kg_co2e);
    }

    let rows = ledger.list();
    if let Some(latest) = rows.first() {
        tracing::info!("latest activity: {} on {}", latest.activity, latest.date);
    }

    // What if the fleet cut a third of its mileage?
    let scenario = Scenario {
        transport_reduction: 33.0,
        ..Default::default()
    };
    let projection = project(&summary, &scenario);
    tracing::info!(
        "scenario: {:.4} -> {:.4} kgCO2e ({}% saved)",
        projection.before,
        projection.after,
        projection.savings_percent
    );
}
