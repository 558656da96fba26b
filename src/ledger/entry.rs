//! Emission entry types
//!
//! [`EmissionEntry`] is the persisted record; [`NewEntry`] is the form input
//! it is built from. Field names on the wire match the hosted backend
//! (`source_category`, `emission_factor`, `emissions_kgCO2e`), so a guest
//! blob and a backend row deserialize with the same types.

use crate::calc::Quantity;
use crate::factors::{Scope, SourceCategory};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Business id stamped on every guest-mode entry
pub const GUEST_BUSINESS_ID: &str = "guest";

/// A persisted emission record
///
/// Immutable once appended: the ledger has no update or delete operation,
/// only append and full-collection reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmissionEntry {
    /// Assigned at persistence time
    pub id: i64,
    /// Owning business; the guest sentinel in local mode
    pub business_id: String,
    pub source_category: SourceCategory,
    /// Activity key within the category, selects the default factor
    pub activity: String,
    /// Quantity of activity, in `unit`
    pub amount: f64,
    /// Informational label; not used in any calculation
    #[serde(default)]
    pub unit: String,
    /// kgCO2e per unit of `amount`
    pub emission_factor: f64,
    /// Always the rounded product of amount and factor at append time
    #[serde(rename = "emissions_kgCO2e", default)]
    pub emissions_kg_co2e: f64,
    /// Calendar date of the activity, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    pub scope: Scope,
}

/// Parse an entry date for ordering.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. Anything else is `None`,
/// which the ledger orders as earliest so listings stay deterministic.
pub fn parse_entry_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Form input for a new entry
///
/// Everything except the category is optional; the ledger fills gaps from
/// the factor catalog at append time. `amount` and `emission_factor` are
/// [`Quantity`] values because web forms submit numbers and strings
/// interchangeably.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntry {
    pub source_category: SourceCategory,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub amount: Quantity,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub emission_factor: Quantity,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub scope: Option<Scope>,
}

impl NewEntry {
    /// Create an input for a category with everything else defaulted
    pub fn new(source_category: SourceCategory) -> Self {
        Self {
            source_category,
            activity: None,
            amount: Quantity::Missing,
            unit: None,
            emission_factor: Quantity::Missing,
            date: None,
            scope: None,
        }
    }

    /// Builder: set the amount
    pub fn amount(mut self, amount: impl Into<Quantity>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Builder: set the activity key
    pub fn activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self
    }

    /// Builder: override the catalog emission factor
    pub fn emission_factor(mut self, factor: impl Into<Quantity>) -> Self {
        self.emission_factor = factor.into();
        self
    }

    /// Builder: set the activity date (`YYYY-MM-DD`)
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Builder: set the unit label
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Builder: override the default scope
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }
}
