//! Backend dispatch
//!
//! The app records emissions against one of two stores: the hosted backend
//! (when a signed-in session holds a bearer token) or the local guest
//! ledger. Both expose the same response shapes, so [`EmissionsBackend`]
//! abstracts over them and callers never branch on where data lives.
//!
//! Transport failures from the remote side are real errors and surface as
//! [`DispatchError`]; the never-fail policy belongs to the guest ledger's
//! read path, not to the network.

mod remote;

pub use remote::RemoteClient;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::RemoteConfig;
use crate::ledger::{AppendReceipt, BulkReceipt, EmissionEntry, GuestLedger, NewEntry, Summary};

/// Common trait for the two places an entry can land
#[async_trait]
pub trait EmissionsBackend: Send + Sync {
    /// Short name for logs ("guest" or "remote")
    fn name(&self) -> &str;

    /// Record a single entry
    async fn add_entry(&self, entry: NewEntry) -> Result<AppendReceipt, DispatchError>;

    /// Record a batch of entries
    async fn add_bulk(&self, entries: Vec<NewEntry>) -> Result<BulkReceipt, DispatchError>;

    /// Dashboard aggregate
    async fn dashboard(&self) -> Result<Summary, DispatchError>;

    /// Full listing, most recent first
    async fn list(&self) -> Result<Vec<EmissionEntry>, DispatchError>;
}

/// Errors that can occur when dispatching to a backend
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Guest ledger write failed
    #[error("Ledger error: {0}")]
    Ledger(#[from] crate::ledger::LedgerError),

    /// HTTP transport failed
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Request timed out
    #[error("Backend request timed out")]
    Timeout,

    /// Backend is unreachable
    #[error("Backend unavailable")]
    Unavailable,

    /// Backend answered with an error (HTTP failure or `success: false`)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend response did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// The guest ledger behind the backend trait
pub struct GuestBackend {
    ledger: Arc<GuestLedger>,
}

impl GuestBackend {
    pub fn new(ledger: Arc<GuestLedger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl EmissionsBackend for GuestBackend {
    fn name(&self) -> &str {
        "guest"
    }

    async fn add_entry(&self, entry: NewEntry) -> Result<AppendReceipt, DispatchError> {
        Ok(self.ledger.append(entry)?)
    }

    async fn add_bulk(&self, entries: Vec<NewEntry>) -> Result<BulkReceipt, DispatchError> {
        Ok(self.ledger.append_bulk(entries)?)
    }

    async fn dashboard(&self) -> Result<Summary, DispatchError> {
        Ok(self.ledger.summarize())
    }

    async fn list(&self) -> Result<Vec<EmissionEntry>, DispatchError> {
        Ok(self.ledger.list())
    }
}

/// Pick the backend for a session.
///
/// A bearer token means an authenticated session, which goes to the hosted
/// backend; everything else stays in the local guest ledger.
pub fn select_backend(
    remote: &RemoteConfig,
    token: Option<String>,
    business_id: impl Into<String>,
    ledger: Arc<GuestLedger>,
) -> Box<dyn EmissionsBackend> {
    match token {
        Some(token) => Box::new(RemoteClient::new(remote.clone(), token, business_id)),
        None => Box::new(GuestBackend::new(ledger)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::SourceCategory;

    #[tokio::test]
    async fn test_guest_backend_round_trip() {
        let backend = GuestBackend::new(Arc::new(GuestLedger::in_memory()));

        let receipt = backend
            .add_entry(
                NewEntry::new(SourceCategory::Fuel)
                    .activity("diesel")
                    .amount(10.0)
                    .date("2026-03-01"),
            )
            .await
            .unwrap();
        assert_eq!(receipt.emissions_kg_co2e, 26.8);

        let summary = backend.dashboard().await.unwrap();
        assert_eq!(summary.total_emissions, 26.8);

        let rows = backend.list().await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_select_backend_by_token() {
        let remote = RemoteConfig::default();
        let ledger = Arc::new(GuestLedger::in_memory());

        let backend = select_backend(&remote, None, "guest", Arc::clone(&ledger));
        assert_eq!(backend.name(), "guest");

        let backend = select_backend(&remote, Some("jwt".to_string()), "biz-42", ledger);
        assert_eq!(backend.name(), "remote");
    }
}
