//! Entry Routes
//!
//! Endpoints for recording and listing emission entries.
//!
//! - POST /api/v1/entries - Single manual entry
//! - POST /api/v1/entries/bulk - Batch of entries
//! - GET /api/v1/emissions/:business_id - Full listing, most recent first

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{BulkEntriesRequest, ListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::ledger::{AppendReceipt, BulkReceipt, NewEntry};

/// Largest accepted bulk batch
const MAX_BATCH: usize = 10_000;

/// POST /api/v1/entries
///
/// Record a single manual entry. The ledger fills catalog defaults and
/// recomputes `emissions_kgCO2e`; the receipt echoes the computed value so
/// the form can confirm its preview.
pub async fn add_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewEntry>,
) -> ApiResult<(StatusCode, Json<AppendReceipt>)> {
    validate_entry(&req)?;

    let receipt = state.ledger.append(req)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// POST /api/v1/entries/bulk
///
/// Record many entries as one ledger rewrite.
pub async fn add_bulk(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BulkEntriesRequest>,
) -> ApiResult<(StatusCode, Json<BulkReceipt>)> {
    if req.entries.is_empty() {
        return Err(ApiError::Validation("Empty batch".to_string()));
    }

    if req.entries.len() > MAX_BATCH {
        return Err(ApiError::Validation(format!(
            "Batch size exceeds maximum of {} entries",
            MAX_BATCH
        )));
    }

    for entry in &req.entries {
        validate_entry(entry)?;
    }

    let receipt = state.ledger.append_bulk(req.entries)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /api/v1/emissions/:business_id
///
/// Full collection ordered by date descending. The path segment exists for
/// contract parity with the hosted backend; this server is single-tenant.
pub async fn list_emissions(
    State(state): State<Arc<AppState>>,
    Path(_business_id): Path<String>,
) -> Json<ListResponse> {
    Json(ListResponse {
        success: true,
        rows: state.ledger.list(),
    })
}

/// Validate an entry request.
///
/// Amounts are quantities of activity, so they must not be negative once
/// coerced (factors may be negative, amounts may not). Garbage input still
/// coerces to zero rather than erroring, matching the form-preview policy.
fn validate_entry(req: &NewEntry) -> ApiResult<()> {
    if req.amount.coerce() < 0.0 {
        return Err(ApiError::Validation(
            "Amount must not be negative".to_string(),
        ));
    }

    if let Some(activity) = &req.activity {
        if activity.len() > 100 {
            return Err(ApiError::Validation(
                "Activity exceeds maximum length of 100 characters".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::SourceCategory;

    #[test]
    fn test_validate_entry_accepts_defaults() {
        let req = NewEntry::new(SourceCategory::Electricity).amount(10.0);
        assert!(validate_entry(&req).is_ok());
    }

    #[test]
    fn test_validate_entry_rejects_negative_amount() {
        let req = NewEntry::new(SourceCategory::Fuel).amount(-5.0);
        assert!(validate_entry(&req).is_err());
    }

    #[test]
    fn test_validate_entry_tolerates_garbage_amount() {
        // Coerce-or-zero: unparseable input is zero, not an error
        let req = NewEntry::new(SourceCategory::Fuel).amount("ten litres");
        assert!(validate_entry(&req).is_ok());
    }
}
