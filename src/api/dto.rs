//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.
//!
//! Append, bulk, dashboard, and forecast responses are the ledger's own
//! receipt types ([`crate::ledger::AppendReceipt`], [`crate::ledger::BulkReceipt`],
//! [`crate::ledger::Summary`], [`crate::forecast::Projection`]) serialized
//! directly; they already carry the hosted backend's field names and success
//! flag. Only the shapes with no ledger counterpart live here.

use crate::factors::{Scope, SourceCategory};
use crate::ledger::{EmissionEntry, NewEntry};
use serde::{Deserialize, Serialize};

// ============================================
// ENTRY DTOs
// ============================================

/// Bulk append request: `{ "entries": [...] }`
#[derive(Debug, Deserialize)]
pub struct BulkEntriesRequest {
    pub entries: Vec<NewEntry>,
}

/// Listing response: full collection, most recent first
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub rows: Vec<EmissionEntry>,
}

// ============================================
// FACTOR CATALOG DTOs
// ============================================

/// One activity and its default factor
#[derive(Debug, Serialize)]
pub struct ActivityFactor {
    pub activity: &'static str,
    pub emission_factor: f64,
}

/// Catalog rows for one category
#[derive(Debug, Serialize)]
pub struct CategoryFactors {
    pub source_category: SourceCategory,
    pub unit: &'static str,
    pub scope: Scope,
    pub activities: Vec<ActivityFactor>,
}

/// Full factor catalog response
#[derive(Debug, Serialize)]
pub struct FactorsResponse {
    pub success: bool,
    pub categories: Vec<CategoryFactors>,
}

// ============================================
// CSV IMPORT DTOs
// ============================================

/// Error for a single row in a CSV import
#[derive(Debug, Serialize)]
pub struct RowError {
    /// 1-indexed data row (header excluded)
    pub row: usize,
    pub error: String,
}

/// CSV import response
#[derive(Debug, Serialize)]
pub struct CsvImportResponse {
    pub success: bool,
    /// Rows appended to the ledger
    pub count: usize,
    /// Rows skipped
    pub rejected: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RowError>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub ledger: String,
    pub uptime_seconds: u64,
    pub version: String,
}
