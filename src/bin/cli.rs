//! GreenLedger CLI
//!
//! Command-line interface for GreenLedger operations:
//! - Record entries (single or CSV batch)
//! - List entries and dashboard summaries
//! - Run reduction scenarios
//! - Inspect the factor catalog
//!
//! By default everything runs against the local guest ledger. Passing
//! `--token` routes operations to the hosted backend instead, through the
//! same dispatch layer the app uses.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use greenledger::config::Config;
use greenledger::csv_import::parse_csv;
use greenledger::dispatch::select_backend;
use greenledger::factors::{self, Scope, SourceCategory};
use greenledger::forecast::{project, Scenario};
use greenledger::ledger::{FileStore, GuestLedger, NewEntry};

#[derive(Parser)]
#[command(name = "greenledger")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Small-business carbon emissions ledger")]
#[command(long_about = "GreenLedger tracks business carbon emissions.\nRecord activities, see category breakdowns, and project reduction scenarios.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Bearer token for the hosted backend (omit for local guest mode)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Business id for hosted backend reads
    #[arg(long, default_value = "guest", global = true)]
    pub business_id: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record an emission entry
    Add {
        /// Source category (electricity, fuel, transport, waste, water,
        /// commute, business_travel)
        category: String,
        /// Activity quantity, in the category's unit
        amount: f64,
        /// Activity key (default: first catalog activity for the category)
        #[arg(short, long)]
        activity: Option<String>,
        /// Emission factor override in kgCO2e per unit
        #[arg(long)]
        factor: Option<f64>,
        /// Activity date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Unit label override
        #[arg(short, long)]
        unit: Option<String>,
        /// Scope override: 1, 2, or 3
        #[arg(short, long)]
        scope: Option<u8>,
    },

    /// Record entries from a CSV file
    Import {
        /// Path to CSV file (header: source_category plus optional date,
        /// activity, amount, unit, emission_factor, scope)
        path: PathBuf,
        /// Parse and report without writing to the ledger
        #[arg(long)]
        dry_run: bool,
    },

    /// List all entries, most recent first
    List,

    /// Show total emissions and the category breakdown
    Summary,

    /// Project a reduction scenario over the current ledger
    Forecast {
        /// Waste reduction in percent
        #[arg(long, default_value_t = 0.0)]
        waste: f64,
        /// Share of electricity moved to solar, in percent
        #[arg(long, default_value_t = 0.0)]
        solar: f64,
        /// Transport reduction in percent
        #[arg(long, default_value_t = 0.0)]
        transport: f64,
        /// Commute reduction in percent
        #[arg(long, default_value_t = 0.0)]
        commute: f64,
        /// Restrict the baseline to one category
        #[arg(long)]
        category: Option<String>,
    },

    /// Print the emission factor catalog
    Factors,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_default();

    let ledger = Arc::new(GuestLedger::new(FileStore::new(
        config.storage.ledger_path(),
    )));
    let backend = select_backend(
        &config.remote,
        cli.token.clone(),
        cli.business_id.clone(),
        Arc::clone(&ledger),
    );

    match cli.command {
        Commands::Add {
            category,
            amount,
            activity,
            factor,
            date,
            unit,
            scope,
        } => {
            let source_category = parse_category(&category)?;

            let mut entry = NewEntry::new(source_category).amount(amount);
            entry.activity = activity;
            entry.unit = unit;
            entry.date = date;
            entry.scope = scope.map(parse_scope).transpose()?;
            if let Some(factor) = factor {
                entry = entry.emission_factor(factor);
            }

            let receipt = backend.add_entry(entry).await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            } else {
                println!(
                    "Recorded {:.4} kgCO2e ({})",
                    receipt.emissions_kg_co2e, receipt.business_id
                );
            }
        }

        Commands::Import { path, dry_run } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {:?}", path))?;
            let outcome = parse_csv(&text);

            for (row, error) in &outcome.errors {
                eprintln!("row {}: {}", row, error);
            }

            if outcome.entries.is_empty() {
                bail!("no importable rows in {:?}", path);
            }

            if dry_run {
                println!(
                    "Dry run: {} rows importable, {} rejected",
                    outcome.entries.len(),
                    outcome.errors.len()
                );
            } else {
                let receipt = backend.add_bulk(outcome.entries).await?;
                println!("Imported {} entries", receipt.count);
            }
        }

        Commands::List => {
            let rows = backend.list().await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No entries recorded");
            } else {
                println!(
                    "{:<12} {:<16} {:<24} {:>10} {:<14} {:>12}",
                    "DATE", "CATEGORY", "ACTIVITY", "AMOUNT", "UNIT", "KGCO2E"
                );
                for row in rows {
                    println!(
                        "{:<12} {:<16} {:<24} {:>10} {:<14} {:>12.4}",
                        row.date,
                        row.source_category.to_string(),
                        row.activity,
                        row.amount,
                        row.unit,
                        row.emissions_kg_co2e
                    );
                }
            }
        }

        Commands::Summary => {
            let summary = backend.dashboard().await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Total emissions: {:.4} kgCO2e", summary.total_emissions);
                for row in &summary.by_category {
                    println!("  {:<16} {:>12.4}", row.source_category.to_string(), row.emissions_kg_co2e);
                }
            }
        }

        Commands::Forecast {
            waste,
            solar,
            transport,
            commute,
            category,
        } => {
            let scenario = Scenario {
                waste_reduction: waste,
                solar_percentage: solar,
                transport_reduction: transport,
                commute_reduction: commute,
                source_category: category.as_deref().map(parse_category).transpose()?,
            };

            let summary = backend.dashboard().await?;
            let projection = project(&summary, &scenario);

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                println!("Current:   {:.4} kgCO2e", projection.before);
                println!("Projected: {:.4} kgCO2e", projection.after);
                println!(
                    "Savings:   {:.4} kgCO2e ({}%)",
                    projection.savings, projection.savings_percent
                );
            }
        }

        Commands::Factors => {
            for &category in SourceCategory::all() {
                let defaults = factors::defaults_for(category);
                println!("{} ({}, {})", category, defaults.unit, defaults.scope);
                for (activity, factor) in factors::activities(category) {
                    println!("  {:<24} {:>8.3} kgCO2e/{}", activity, factor, defaults.unit);
                }
            }
        }

        Commands::Config { output } => {
            let content = greenledger::config::generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    println!("Wrote config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Parse a category tag, listing the valid ones on failure
fn parse_category(tag: &str) -> anyhow::Result<SourceCategory> {
    SourceCategory::parse(tag).ok_or_else(|| {
        let known: Vec<String> = SourceCategory::all().iter().map(|c| c.to_string()).collect();
        anyhow::anyhow!("unknown category '{}' (expected one of: {})", tag, known.join(", "))
    })
}

fn parse_scope(n: u8) -> anyhow::Result<Scope> {
    match n {
        1 => Ok(Scope::Scope1),
        2 => Ok(Scope::Scope2),
        3 => Ok(Scope::Scope3),
        _ => bail!("scope must be 1, 2, or 3"),
    }
}
