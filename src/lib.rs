//! # GreenLedger
//!
//! Small-Business Carbon Ledger - A full-stack Rust application for recording,
//! aggregating, and forecasting business carbon emissions.
//!
//! ## Features
//!
//! - **Guest ledger**: Append-only local store that mimics the hosted
//!   backend's response shapes, so the app works before sign-in
//! - **Emission calculator**: Pure quantity × factor arithmetic with
//!   form-friendly input coercion
//! - **Factor catalog**: Static per-category activity factors, units, and
//!   GHG scopes for pre-filling entries
//! - **Scenario forecasting**: What-if reduction projections over the
//!   dashboard summary
//! - **Backend dispatch**: The same operations against the hosted API for
//!   authenticated sessions
//!
//! ## Modules
//!
//! - [`calc`]: Emission computation and numeric coercion
//! - [`factors`]: Emission factor catalog
//! - [`ledger`]: Guest ledger and storage backends
//! - [`forecast`]: Scenario projections
//! - [`csv_import`]: Bulk CSV parsing
//! - [`api`]: REST API server with Axum
//! - [`dispatch`]: Remote/guest backend selection
//!
//! ## Quick Start
//!
//! ```rust
//! use greenledger::factors::SourceCategory;
//! use greenledger::ledger::{GuestLedger, NewEntry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // A ledger with no persistence (swap in FileStore for a real one)
//!     let ledger = GuestLedger::in_memory();
//!
//!     // Record a fuel purchase; catalog defaults fill the rest
//!     let receipt = ledger.append(
//!         NewEntry::new(SourceCategory::Fuel)
//!             .activity("diesel")
//!             .amount(120.0)
//!             .date("2026-03-01"),
//!     )?;
//!     println!("recorded {} kgCO2e", receipt.emissions_kg_co2e);
//!
//!     // Aggregate views
//!     let summary = ledger.summarize();
//!     println!("total: {} kgCO2e over {} categories",
//!         summary.total_emissions, summary.by_category.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod calc;
pub mod config;
pub mod csv_import;
pub mod dispatch;
pub mod factors;
pub mod forecast;
pub mod ledger;

// Re-export top-level types for convenience
pub use calc::{compute, round_emissions, Quantity};

pub use factors::{
    activities, default_factor, defaults_for, CategoryDefaults, Scope, SourceCategory,
};

pub use ledger::{
    AppendReceipt, BulkReceipt, CategoryTotal, EmissionEntry, FileStore, GuestLedger, IdGenerator,
    LedgerError, LedgerResult, LedgerStore, MemoryStore, NewEntry, Summary, GUEST_BUSINESS_ID,
    GUEST_LOCAL_BUSINESS_ID,
};

pub use forecast::{project, Projection, Scenario};

pub use csv_import::{parse_csv, CsvImportOutcome};

pub use api::{build_router, serve, ApiError, ApiResult, AppState};

pub use dispatch::{select_backend, DispatchError, EmissionsBackend, GuestBackend, RemoteClient};

pub use config::{
    generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig, RemoteConfig,
    StorageConfig,
};
