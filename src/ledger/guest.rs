//! Guest ledger operations
//!
//! Append-only record keeping over a [`LedgerStore`] blob, with the same
//! response shapes as the hosted backend. Every mutation is a full
//! read-modify-write of the serialized collection, serialized in-process by
//! one mutex; there is no cross-process coordination, so two processes
//! sharing a file can lose updates. Acceptable for guest mode, not for a
//! system of record.

use crate::calc;
use crate::factors::{self, SourceCategory};
use crate::ledger::entry::{parse_entry_date, EmissionEntry, NewEntry, GUEST_BUSINESS_ID};
use crate::ledger::error::LedgerResult;
use crate::ledger::store::{LedgerStore, MemoryStore};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Business id reported in append receipts for guest-mode writes
pub const GUEST_LOCAL_BUSINESS_ID: &str = "guest_local";

/// Monotonic entry id generator
///
/// Seeded once from the wall clock so ids still read like timestamps, then
/// incremented atomically. Rapid successive appends cannot collide the way
/// raw clock reads can.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(Utc::now().timestamp_millis())
    }

    /// Start the sequence at a specific value
    pub fn starting_at(seed: i64) -> Self {
        Self {
            next: AtomicI64::new(seed),
        }
    }

    /// Next id in the sequence
    pub fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of appending a single entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppendReceipt {
    pub success: bool,
    pub business_id: String,
    #[serde(rename = "emissions_kgCO2e")]
    pub emissions_kg_co2e: f64,
}

/// Result of a bulk append
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkReceipt {
    pub success: bool,
    pub count: usize,
}

/// Summed emissions for one source category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub source_category: SourceCategory,
    #[serde(rename = "emissions_kgCO2e")]
    pub emissions_kg_co2e: f64,
}

/// Dashboard aggregate over the whole ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub success: bool,
    pub total_emissions: f64,
    /// One row per distinct category, in first-seen order
    pub by_category: Vec<CategoryTotal>,
}

/// The guest-mode record store
///
/// Entries are immutable once appended; the only operations are append and
/// full-collection reads. Reads fail open: an unreadable blob is treated as
/// an empty ledger rather than an error, so UI callers can never crash on
/// corrupt local state.
pub struct GuestLedger {
    store: Box<dyn LedgerStore>,
    ids: IdGenerator,
    write_guard: Mutex<()>,
}

impl GuestLedger {
    pub fn new(store: impl LedgerStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            ids: IdGenerator::new(),
            write_guard: Mutex::new(()),
        }
    }

    /// Ledger over an in-memory store, for tests and ephemeral sessions
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Append one entry, assigning its id and the guest business id.
    ///
    /// `emissions_kgCO2e` is always recomputed from amount and factor here;
    /// a caller-supplied value is never trusted.
    pub fn append(&self, new: NewEntry) -> LedgerResult<AppendReceipt> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.load();
        let entry = self.materialize(new);
        let receipt = AppendReceipt {
            success: true,
            business_id: GUEST_LOCAL_BUSINESS_ID.to_string(),
            emissions_kg_co2e: entry.emissions_kg_co2e,
        };

        entries.push(entry);
        self.persist(&entries)?;

        Ok(receipt)
    }

    /// Append many entries as one combined rewrite.
    ///
    /// Per-entry defaulting is identical to [`GuestLedger::append`]. The
    /// store is written once, so from the caller's view the batch is
    /// all-or-nothing.
    pub fn append_bulk(&self, batch: Vec<NewEntry>) -> LedgerResult<BulkReceipt> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.load();
        let count = batch.len();
        entries.extend(batch.into_iter().map(|new| self.materialize(new)));
        self.persist(&entries)?;

        Ok(BulkReceipt {
            success: true,
            count,
        })
    }

    /// Total emissions plus a per-category breakdown in first-seen order.
    ///
    /// Never fails; an unreadable ledger summarizes to zero.
    pub fn summarize(&self) -> Summary {
        let entries = self.load();

        let mut total = 0.0;
        let mut by_category: Vec<CategoryTotal> = Vec::new();

        for entry in &entries {
            total += entry.emissions_kg_co2e;

            match by_category
                .iter_mut()
                .find(|row| row.source_category == entry.source_category)
            {
                Some(row) => row.emissions_kg_co2e += entry.emissions_kg_co2e,
                None => by_category.push(CategoryTotal {
                    source_category: entry.source_category,
                    emissions_kg_co2e: entry.emissions_kg_co2e,
                }),
            }
        }

        Summary {
            success: true,
            total_emissions: total,
            by_category,
        }
    }

    /// Full collection, most recent activity date first.
    ///
    /// Entries whose date does not parse sort as earliest (after all dated
    /// rows); the sort is stable, so the order is deterministic. Never fails.
    pub fn list(&self) -> Vec<EmissionEntry> {
        let mut entries = self.load();
        entries.sort_by_key(|entry| Reverse(parse_entry_date(&entry.date)));
        entries
    }

    /// Number of entries currently in the ledger
    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }

    /// Build the persisted record from form input, filling catalog defaults
    fn materialize(&self, new: NewEntry) -> EmissionEntry {
        let defaults = factors::defaults_for(new.source_category);

        let activity = new
            .activity
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| defaults.activity.to_string());

        let emission_factor = if new.emission_factor.is_missing() {
            factors::default_factor(new.source_category, &activity)
                .unwrap_or(defaults.emission_factor)
        } else {
            new.emission_factor.coerce()
        };

        let amount = new.amount.coerce();

        let date = new
            .date
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| Utc::now().date_naive().to_string());

        EmissionEntry {
            id: self.ids.next_id(),
            business_id: GUEST_BUSINESS_ID.to_string(),
            source_category: new.source_category,
            activity,
            amount,
            unit: new.unit.unwrap_or_else(|| defaults.unit.to_string()),
            emission_factor,
            emissions_kg_co2e: calc::compute(amount, emission_factor),
            date,
            scope: new.scope.unwrap_or(defaults.scope),
        }
    }

    fn load(&self) -> Vec<EmissionEntry> {
        let Some(blob) = self.store.read() else {
            return Vec::new();
        };

        match serde_json::from_str(&blob) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "guest ledger blob unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, entries: &[EmissionEntry]) -> LedgerResult<()> {
        let blob = serde_json::to_string(entries)?;
        self.store.write(&blob)
    }
}
