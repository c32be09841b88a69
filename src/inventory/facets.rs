use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::Vehicle;

/// Distinct values used to populate the make/model selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub makes: Vec<String>,
    pub models: Vec<String>,
}

/// Distinct makes across the whole collection, and distinct models scoped to
/// `selected_make` when one is given (an empty string counts as none).
pub fn facets(vehicles: &[Vehicle], selected_make: Option<&str>) -> Facets {
    let makes = distinct_sorted(vehicles.iter().map(|v| v.make.as_str()));
    let models = match selected_make.filter(|make| !make.is_empty()) {
        Some(make) => models_for_make(vehicles, make),
        None => distinct_sorted(vehicles.iter().map(|v| v.model.as_str())),
    };
    Facets { makes, models }
}

pub fn models_for_make(vehicles: &[Vehicle], make: &str) -> Vec<String> {
    distinct_sorted(
        vehicles
            .iter()
            .filter(|v| v.make == make)
            .map(|v| v.model.as_str()),
    )
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
