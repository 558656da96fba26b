//! Emission calculation
//!
//! The single arithmetic rule of the ledger: an activity quantity times an
//! emission factor, rounded to four decimal places of kgCO2e.
//!
//! Inputs arrive from web forms, so they may be numbers, numeric strings, or
//! missing entirely. [`Quantity`] coerces all of those to a number with a
//! coerce-or-zero policy: anything that is not a finite number becomes `0.0`.
//! [`compute`] therefore never fails, which lets callers re-run it on every
//! keystroke for live previews. The permissive coercion is a property of this
//! boundary only; other layers validate rather than coerce.

use serde::{Deserialize, Serialize};

/// Number of decimal places kept in computed kgCO2e values
pub const EMISSION_DECIMALS: u32 = 4;

/// A quantity as supplied by a form: numeric, numeric string, or absent.
///
/// Deserializes untagged, so JSON `12.5`, `"12.5"`, and `null` all parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// A plain JSON number
    Number(f64),
    /// A string that may hold a number (e.g. `"10"`, `"0.359"`)
    Text(String),
    /// JSON null / field left empty
    Missing,
}

impl Quantity {
    /// Coerce to a finite `f64`, defaulting to zero.
    ///
    /// Non-numeric strings, NaN, and infinities all coerce to `0.0`.
    pub fn coerce(&self) -> f64 {
        match self {
            Quantity::Number(n) if n.is_finite() => *n,
            Quantity::Number(_) => 0.0,
            Quantity::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
            Quantity::Missing => 0.0,
        }
    }

    /// True if no value was supplied
    pub fn is_missing(&self) -> bool {
        matches!(self, Quantity::Missing)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Missing
    }
}

impl From<f64> for Quantity {
    fn from(n: f64) -> Self {
        Quantity::Number(n)
    }
}

impl From<&str> for Quantity {
    fn from(s: &str) -> Self {
        Quantity::Text(s.to_string())
    }
}

impl From<String> for Quantity {
    fn from(s: String) -> Self {
        Quantity::Text(s)
    }
}

impl From<&Quantity> for Quantity {
    fn from(q: &Quantity) -> Self {
        q.clone()
    }
}

impl From<Option<f64>> for Quantity {
    fn from(n: Option<f64>) -> Self {
        n.map(Quantity::Number).unwrap_or(Quantity::Missing)
    }
}

/// Round a kgCO2e value to [`EMISSION_DECIMALS`] places,
/// half away from zero.
pub fn round_emissions(value: f64) -> f64 {
    let scale = 10_f64.powi(EMISSION_DECIMALS as i32);
    (value * scale).round() / scale
}

/// Compute emissions in kgCO2e for a quantity and an emission factor.
///
/// Both inputs go through [`Quantity::coerce`], so this never fails and an
/// unparseable or missing input simply contributes zero. Negative factors
/// propagate: recycling credits are modeled as negative factors and yield
/// negative (avoided) emissions.
pub fn compute(amount: impl Into<Quantity>, factor: impl Into<Quantity>) -> f64 {
    round_emissions(amount.into().coerce() * factor.into().coerce())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_basic() {
        assert_eq!(compute(10.0, 0.5), 5.0);
    }

    #[test]
    fn test_compute_zeros() {
        assert_eq!(compute(0.0, 0.5), 0.0);
        assert_eq!(compute(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_compute_string_coercion() {
        assert_eq!(compute("10", "0.5"), 5.0);
        assert_eq!(compute(" 2.5 ", 4.0), 10.0);
    }

    #[test]
    fn test_compute_precision() {
        assert_eq!(compute(10.123, 2.5), 25.3075);
    }

    #[test]
    fn test_compute_rounds_to_four_places() {
        assert_eq!(compute(1.0, 0.00005), 0.0001);
        assert_eq!(compute(3.0, 0.333333), 1.0);
    }

    #[test]
    fn test_compute_garbage_is_zero() {
        assert_eq!(compute("not a number", 2.0), 0.0);
        assert_eq!(compute(5.0, ""), 0.0);
        assert_eq!(compute(f64::NAN, 2.0), 0.0);
        assert_eq!(compute(f64::INFINITY, 2.0), 0.0);
    }

    #[test]
    fn test_compute_negative_factor_propagates() {
        // Recycling credit: avoided emissions come out negative
        assert_eq!(compute(10.0, -0.4), -4.0);
    }

    #[test]
    fn test_quantity_deserialization() {
        let q: Quantity = serde_json::from_str("12.5").unwrap();
        assert_eq!(q.coerce(), 12.5);

        let q: Quantity = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(q.coerce(), 12.5);

        let q: Quantity = serde_json::from_str("null").unwrap();
        assert!(q.is_missing());
        assert_eq!(q.coerce(), 0.0);
    }
}
