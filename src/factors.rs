//! Emission factor catalog
//!
//! Static lookup tables that pre-fill the entry form:
//! - [`SourceCategory`]: the emission source taxonomy
//! - [`Scope`]: GHG Protocol scope classification
//! - Per-category activity tables mapping an activity key to its default
//!   emission factor in kgCO2e per unit
//! - [`CategoryDefaults`]: unit, scope, and first activity for a category
//!
//! Factors are user-overridable at entry time; the catalog only supplies
//! defaults. Negative factors (recycling credits) are valid entries.

use serde::{Deserialize, Serialize};

/// Emission source category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    /// Purchased electricity (Scope 2)
    Electricity,
    /// Fuel burned on site (Scope 1)
    Fuel,
    /// Goods and delivery transport
    Transport,
    /// Waste disposal and recycling
    Waste,
    /// Water supply and treatment
    Water,
    /// Employee commuting
    Commute,
    /// Business travel
    BusinessTravel,
    /// Catch-all for rows persisted with an unrecognized tag
    #[serde(other)]
    Other,
}

impl SourceCategory {
    /// Parse a category tag strictly, with no `Other` fallback.
    ///
    /// Deserialization maps unknown tags to [`SourceCategory::Other`] so old
    /// blobs stay readable; validation paths (CSV import) use this instead
    /// to reject typos.
    pub fn parse(tag: &str) -> Option<SourceCategory> {
        Self::all().iter().copied().find(|c| c.to_string() == tag)
    }

    /// The categories selectable on the entry form
    pub fn all() -> &'static [SourceCategory] {
        &[
            SourceCategory::Electricity,
            SourceCategory::Fuel,
            SourceCategory::Transport,
            SourceCategory::Waste,
            SourceCategory::Water,
            SourceCategory::Commute,
            SourceCategory::BusinessTravel,
        ]
    }
}

impl std::fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceCategory::Electricity => write!(f, "electricity"),
            SourceCategory::Fuel => write!(f, "fuel"),
            SourceCategory::Transport => write!(f, "transport"),
            SourceCategory::Waste => write!(f, "waste"),
            SourceCategory::Water => write!(f, "water"),
            SourceCategory::Commute => write!(f, "commute"),
            SourceCategory::BusinessTravel => write!(f, "business_travel"),
            SourceCategory::Other => write!(f, "other"),
        }
    }
}

/// GHG Protocol scope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Direct emissions from owned or controlled sources
    #[serde(rename = "Scope 1")]
    Scope1,
    /// Indirect emissions from purchased energy
    #[serde(rename = "Scope 2")]
    Scope2,
    /// All other indirect emissions in the value chain
    #[serde(rename = "Scope 3")]
    Scope3,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Scope1 => write!(f, "Scope 1"),
            Scope::Scope2 => write!(f, "Scope 2"),
            Scope::Scope3 => write!(f, "Scope 3"),
        }
    }
}

/// Default emission factors per (category, activity), in kgCO2e per unit
const ELECTRICITY_FACTORS: &[(&str, f64)] = &[
    ("air_conditioning", 0.359),
    ("electricity_consumption", 0.359),
];

const FUEL_FACTORS: &[(&str, f64)] = &[
    ("LPG", 3.010),
    ("diesel", 2.680),
    ("diesel_generator", 2.670),
    ("petrol", 2.330),
];

const TRANSPORT_FACTORS: &[(&str, f64)] = &[
    ("bus", 0.090),
    ("car_diesel", 0.201),
    ("car_petrol", 0.225),
    ("delivery_transport", 0.210),
    ("delivery_van", 0.315),
    ("motorbike", 0.112),
];

const WASTE_FACTORS: &[(&str, f64)] = &[
    ("food_composting", 0.200),
    ("food_landfill", 1.400),
    ("paper_landfill", 1.000),
    ("paper_recycling", -0.400),
    ("plastic_landfill", 2.500),
    ("plastic_recycling", -0.400),
    ("solid_waste", 1.500),
];

const WATER_FACTORS: &[(&str, f64)] = &[
    ("wastewater_centralized", 0.272),
    ("wastewater_unmanaged", 0.708),
    ("water_supply", 0.344),
];

const COMMUTE_FACTORS: &[(&str, f64)] = &[
    ("bus", 0.090),
    ("car_petrol", 0.225),
    ("delivery_van", 0.315),
    ("motorbike", 0.112),
];

const BUSINESS_TRAVEL_FACTORS: &[(&str, f64)] = &[
    ("car", 0.225),
    ("flight", 0.150),
    ("motorbike", 0.112),
];

/// Activities and their default factors for a category
pub fn activities(category: SourceCategory) -> &'static [(&'static str, f64)] {
    match category {
        SourceCategory::Electricity => ELECTRICITY_FACTORS,
        SourceCategory::Fuel => FUEL_FACTORS,
        SourceCategory::Transport => TRANSPORT_FACTORS,
        SourceCategory::Waste => WASTE_FACTORS,
        SourceCategory::Water => WATER_FACTORS,
        SourceCategory::Commute => COMMUTE_FACTORS,
        SourceCategory::BusinessTravel => BUSINESS_TRAVEL_FACTORS,
        SourceCategory::Other => &[],
    }
}

/// Look up the default emission factor for an activity within a category
pub fn default_factor(category: SourceCategory, activity: &str) -> Option<f64> {
    activities(category)
        .iter()
        .find(|(name, _)| *name == activity)
        .map(|(_, factor)| *factor)
}

/// Form defaults for a category: unit, scope, and the first catalog activity
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDefaults {
    pub unit: &'static str,
    pub scope: Scope,
    pub activity: &'static str,
    pub emission_factor: f64,
}

/// Defaults used to pre-fill an entry for a category.
///
/// Unit and scope follow the category; activity and factor are the first row
/// of its table. `Other` has no catalog rows, so it gets a placeholder
/// activity with a zero factor.
pub fn defaults_for(category: SourceCategory) -> CategoryDefaults {
    let (unit, scope) = match category {
        SourceCategory::Electricity => ("kWh", Scope::Scope2),
        SourceCategory::Fuel => ("litres", Scope::Scope1),
        SourceCategory::Transport => ("km", Scope::Scope3),
        SourceCategory::Waste => ("kg", Scope::Scope3),
        SourceCategory::Water => ("m3", Scope::Scope3),
        SourceCategory::Commute | SourceCategory::BusinessTravel => {
            ("passenger-km", Scope::Scope3)
        }
        SourceCategory::Other => ("", Scope::Scope3),
    };

    let (activity, emission_factor) = activities(category)
        .first()
        .copied()
        .unwrap_or(("activity", 0.0));

    CategoryDefaults {
        unit,
        scope,
        activity,
        emission_factor,
    }
}

/// Default scope for a category, used when an entry omits it
pub fn default_scope(category: SourceCategory) -> Scope {
    defaults_for(category).scope
}
