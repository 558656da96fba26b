//! CSV Import Routes
//!
//! - POST /api/v1/import/csv - Bulk-load entries from a CSV document
//!
//! Parsing and row validation live in [`crate::csv_import`]; this handler
//! maps the outcome onto HTTP: all rows good is 201, a mix is 207, nothing
//! accepted is 400.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{CsvImportResponse, RowError};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::csv_import::parse_csv;

/// POST /api/v1/import/csv
pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    body: String,
) -> ApiResult<(StatusCode, Json<CsvImportResponse>)> {
    let outcome = parse_csv(&body);

    if outcome.is_empty() {
        return Err(ApiError::Validation(
            "CSV contained no data rows".to_string(),
        ));
    }

    let count = if outcome.entries.is_empty() {
        0
    } else {
        state.ledger.append_bulk(outcome.entries)?.count
    };

    let errors: Vec<RowError> = outcome
        .errors
        .into_iter()
        .map(|(row, error)| RowError { row, error })
        .collect();

    let status = if errors.is_empty() {
        StatusCode::CREATED
    } else if count > 0 {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::BAD_REQUEST
    };

    tracing::info!(imported = count, rejected = errors.len(), "CSV import");

    Ok((
        status,
        Json(CsvImportResponse {
            success: errors.is_empty(),
            count,
            rejected: errors.len(),
            errors,
        }),
    ))
}
