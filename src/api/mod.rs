//! GreenLedger REST API
//!
//! HTTP API layer for GreenLedger, built with Axum. It exposes the guest
//! ledger with the hosted backend's endpoint shapes, so the SPA talks to one
//! contract whether its data lives locally or remotely.
//!
//! # Endpoints
//!
//! ## Entries
//! - `POST /api/v1/entries` - Single manual entry
//! - `POST /api/v1/entries/bulk` - Batch of entries
//! - `GET /api/v1/emissions/:business_id` - Full listing, most recent first
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard/:business_id` - Total + per-category breakdown
//!
//! ## Forecast
//! - `POST /api/v1/forecast` - Scenario projection over the current ledger
//!
//! ## Catalog
//! - `GET /api/v1/factors` - Static emission factor catalog
//!
//! ## Import
//! - `POST /api/v1/import/csv` - Bulk-load entries from CSV
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use greenledger::api::{build_router, serve, AppState};
//! use greenledger::config::ApiConfig;
//! use greenledger::ledger::GuestLedger;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = Arc::new(GuestLedger::in_memory());
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(ledger, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Entry routes
        .route("/entries", post(routes::entries::add_entry))
        .route("/entries/bulk", post(routes::entries::add_bulk))
        .route("/emissions/:business_id", get(routes::entries::list_emissions))
        // Dashboard routes
        .route("/dashboard/:business_id", get(routes::dashboard::get_dashboard))
        // Forecast routes
        .route("/forecast", post(routes::forecast::run_forecast))
        // Catalog routes
        .route("/factors", get(routes::factors::get_factors))
        // Import routes - with a larger body limit for CSV uploads (10 MB)
        .route("/import/csv", post(routes::import::import_csv))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("GreenLedger API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("GreenLedger API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::GuestLedger;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let ledger = Arc::new(GuestLedger::in_memory());
        let state = AppState::new(ledger, ApiConfig::default());
        build_router(state)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_add_entry_returns_backend_shape() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/entries")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"source_category": "fuel", "activity": "diesel", "amount": 10}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_string(response).await;
        assert!(body.contains("\"success\":true"));
        assert!(body.contains("\"business_id\":\"guest_local\""));
        assert!(body.contains("\"emissions_kgCO2e\":26.8"));
    }

    #[tokio::test]
    async fn test_add_entry_invalid_json() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/entries")
                    .header("Content-Type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_entry_negative_amount_rejected() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/entries")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"source_category": "fuel", "amount": -3}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bulk_then_dashboard() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/entries/bulk")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"entries": [
                            {"source_category": "fuel", "activity": "diesel", "amount": 10},
                            {"source_category": "electricity", "activity": "electricity_consumption", "amount": 100}
                        ]}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(body_string(response).await.contains("\"count\":2"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard/guest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        let summary: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(summary["success"], serde_json::json!(true));
        assert!((summary["total_emissions"].as_f64().unwrap() - 62.7).abs() < 1e-9);
        assert_eq!(summary["by_category"].as_array().unwrap().len(), 2);
        assert_eq!(summary["by_category"][0]["source_category"], "fuel");
    }

    #[tokio::test]
    async fn test_empty_bulk_rejected() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/entries/bulk")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"entries": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_emissions_empty() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/emissions/guest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("\"success\":true"));
        assert!(body.contains("\"rows\":[]"));
    }

    #[tokio::test]
    async fn test_forecast_on_empty_ledger() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/forecast")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"waste_reduction": 50}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("\"before\":0"));
        assert!(body.contains("\"after\":0"));
    }

    #[tokio::test]
    async fn test_factors_catalog() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/factors")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("\"source_category\":\"business_travel\""));
        assert!(body.contains("\"activity\":\"diesel\""));
    }

    #[tokio::test]
    async fn test_csv_import_partial() {
        let app = create_test_app();

        let csv = "source_category,activity,amount,date\n\
                   fuel,diesel,10,2026-03-01\n\
                   unicorns,sparkles,5,2026-03-02\n";

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/import/csv")
                    .header("Content-Type", "text/csv")
                    .body(Body::from(csv))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::MULTI_STATUS);

        let body = body_string(response).await;
        assert!(body.contains("\"count\":1"));
        assert!(body.contains("\"rejected\":1"));
    }
}
