//! Dashboard Routes
//!
//! - GET /api/v1/dashboard/:business_id - Total emissions + category breakdown

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::ledger::Summary;

/// GET /api/v1/dashboard/:business_id
///
/// Aggregate view over the whole ledger: total kgCO2e and one row per
/// distinct source category in first-seen order. Never fails; an empty or
/// unreadable ledger summarizes to zero.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(_business_id): Path<String>,
) -> Json<Summary> {
    Json(state.ledger.summarize())
}
