//! Factor Catalog Routes
//!
//! - GET /api/v1/factors - Static emission factor catalog

use axum::Json;

use crate::api::dto::{ActivityFactor, CategoryFactors, FactorsResponse};
use crate::factors::{activities, defaults_for, SourceCategory};

/// GET /api/v1/factors
///
/// The full catalog the entry form pre-fills from: per category, the default
/// unit and scope plus every known activity with its default factor.
pub async fn get_factors() -> Json<FactorsResponse> {
    let categories = SourceCategory::all()
        .iter()
        .map(|&category| {
            let defaults = defaults_for(category);
            CategoryFactors {
                source_category: category,
                unit: defaults.unit,
                scope: defaults.scope,
                activities: activities(category)
                    .iter()
                    .map(|&(activity, emission_factor)| ActivityFactor {
                        activity,
                        emission_factor,
                    })
                    .collect(),
            }
        })
        .collect();

    Json(FactorsResponse {
        success: true,
        categories,
    })
}
