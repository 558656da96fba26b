//! Forecast Routes
//!
//! - POST /api/v1/forecast - Scenario projection over the current ledger

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::forecast::{project, Projection, Scenario};

/// POST /api/v1/forecast
///
/// Apply reduction sliders to the current dashboard summary and report
/// baseline, projected total, and savings. Pure arithmetic over the
/// summary; safe to call on every slider change.
pub async fn run_forecast(
    State(state): State<Arc<AppState>>,
    Json(scenario): Json<Scenario>,
) -> Json<Projection> {
    let summary = state.ledger.summarize();
    Json(project(&summary, &scenario))
}
