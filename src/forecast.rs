//! Scenario forecasting
//!
//! What-if projections over a dashboard summary: each slider in a
//! [`Scenario`] reduces one category's emissions by a percentage, and
//! [`project`] reports the baseline, the projected total, and the savings.
//! Pure and synchronous; it runs on every slider change.

use crate::calc::round_emissions;
use crate::factors::SourceCategory;
use crate::ledger::Summary;
use serde::{Deserialize, Serialize};

/// Reduction sliders, each a percentage in 0–100
///
/// `solar_percentage` models replacing grid electricity with on-site solar,
/// so it offsets the electricity category. An optional category filter
/// restricts the baseline to a single source (`"all"` or absent means the
/// whole ledger).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default)]
    pub waste_reduction: f64,
    #[serde(default)]
    pub solar_percentage: f64,
    #[serde(default)]
    pub transport_reduction: f64,
    #[serde(default)]
    pub commute_reduction: f64,
    #[serde(default, deserialize_with = "deserialize_filter")]
    pub source_category: Option<SourceCategory>,
}

impl Scenario {
    /// Reduction percentage applied to a category, clamped to 0–100
    fn reduction_for(&self, category: SourceCategory) -> f64 {
        let pct = match category {
            SourceCategory::Waste => self.waste_reduction,
            SourceCategory::Electricity => self.solar_percentage,
            SourceCategory::Transport => self.transport_reduction,
            SourceCategory::Commute => self.commute_reduction,
            _ => 0.0,
        };
        pct.clamp(0.0, 100.0)
    }
}

/// Accepts `"all"`, empty, or absent as "no filter"; otherwise a category tag
fn deserialize_filter<'de, D>(deserializer: D) -> Result<Option<SourceCategory>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("all") | Some("") => Ok(None),
        Some(tag) => serde_json::from_value(serde_json::Value::String(tag.to_string()))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Projection result, shaped like the hosted scenario endpoint's response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub success: bool,
    /// Baseline emissions before any reduction, kgCO2e
    pub before: f64,
    /// Projected emissions with the scenario applied, kgCO2e
    pub after: f64,
    /// `before - after`, kgCO2e
    pub savings: f64,
    /// Savings as a percentage of the baseline, one decimal place
    pub savings_percent: f64,
}

/// Apply a scenario to a summary.
///
/// Each category's emissions scale by `1 - reduction/100`; categories with
/// no slider pass through unchanged. With a category filter set, only that
/// category contributes to the baseline and projection.
pub fn project(summary: &Summary, scenario: &Scenario) -> Projection {
    let rows = summary
        .by_category
        .iter()
        .filter(|row| match scenario.source_category {
            Some(filter) => row.source_category == filter,
            None => true,
        });

    let mut before = 0.0;
    let mut after = 0.0;

    for row in rows {
        before += row.emissions_kg_co2e;
        after += row.emissions_kg_co2e * (1.0 - scenario.reduction_for(row.source_category) / 100.0);
    }

    let savings = before - after;
    let savings_percent = if before > 0.0 {
        ((savings / before) * 1000.0).round() / 10.0
    } else {
        0.0
    };

    Projection {
        success: true,
        before: round_emissions(before),
        after: round_emissions(after),
        savings: round_emissions(savings),
        savings_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CategoryTotal;

    fn summary(rows: &[(SourceCategory, f64)]) -> Summary {
        Summary {
            success: true,
            total_emissions: rows.iter().map(|(_, v)| v).sum(),
            by_category: rows
                .iter()
                .map(|&(source_category, emissions_kg_co2e)| CategoryTotal {
                    source_category,
                    emissions_kg_co2e,
                })
                .collect(),
        }
    }

    #[test]
    fn test_zero_scenario_is_identity() {
        let s = summary(&[
            (SourceCategory::Fuel, 100.0),
            (SourceCategory::Waste, 50.0),
        ]);
        let p = project(&s, &Scenario::default());

        assert_eq!(p.before, 150.0);
        assert_eq!(p.after, 150.0);
        assert_eq!(p.savings, 0.0);
        assert_eq!(p.savings_percent, 0.0);
    }

    #[test]
    fn test_waste_reduction_halves_waste() {
        let s = summary(&[
            (SourceCategory::Fuel, 100.0),
            (SourceCategory::Waste, 50.0),
        ]);
        let scenario = Scenario {
            waste_reduction: 50.0,
            ..Default::default()
        };

        let p = project(&s, &scenario);
        assert_eq!(p.before, 150.0);
        assert_eq!(p.after, 125.0);
        assert_eq!(p.savings, 25.0);
        assert!((p.savings_percent - 16.7).abs() < 1e-9);
    }

    #[test]
    fn test_solar_offsets_electricity() {
        let s = summary(&[(SourceCategory::Electricity, 200.0)]);
        let scenario = Scenario {
            solar_percentage: 25.0,
            ..Default::default()
        };

        let p = project(&s, &scenario);
        assert_eq!(p.after, 150.0);
        assert_eq!(p.savings_percent, 25.0);
    }

    #[test]
    fn test_category_filter_restricts_baseline() {
        let s = summary(&[
            (SourceCategory::Fuel, 100.0),
            (SourceCategory::Transport, 80.0),
        ]);
        let scenario = Scenario {
            transport_reduction: 50.0,
            source_category: Some(SourceCategory::Transport),
            ..Default::default()
        };

        let p = project(&s, &scenario);
        assert_eq!(p.before, 80.0);
        assert_eq!(p.after, 40.0);
    }

    #[test]
    fn test_out_of_range_percentages_clamp() {
        let s = summary(&[(SourceCategory::Waste, 100.0)]);
        let scenario = Scenario {
            waste_reduction: 250.0,
            ..Default::default()
        };
        assert_eq!(project(&s, &scenario).after, 0.0);

        let scenario = Scenario {
            waste_reduction: -30.0,
            ..Default::default()
        };
        assert_eq!(project(&s, &scenario).after, 100.0);
    }

    #[test]
    fn test_empty_summary_projects_zero() {
        let p = project(&summary(&[]), &Scenario::default());
        assert_eq!(p.before, 0.0);
        assert_eq!(p.after, 0.0);
        assert_eq!(p.savings_percent, 0.0);
    }

    #[test]
    fn test_scenario_accepts_all_as_no_filter() {
        let json = r#"{"waste_reduction": 10, "source_category": "all"}"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.source_category, None);
        assert_eq!(scenario.waste_reduction, 10.0);

        let json = r#"{"source_category": "waste"}"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.source_category, Some(SourceCategory::Waste));
    }
}
