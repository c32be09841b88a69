use super::criteria::FilterCriteria;
use crate::models::Vehicle;

/// Returns the vehicles matching every criterion, in collection order.
pub fn apply_filters<'a>(vehicles: &'a [Vehicle], criteria: &FilterCriteria) -> Vec<&'a Vehicle> {
    let matcher = Matcher::new(criteria);
    vehicles.iter().filter(|vehicle| matcher.matches(vehicle)).collect()
}

/// Positions of the matching vehicles, used by the memoized inventory.
pub(crate) fn matching_indices(vehicles: &[Vehicle], criteria: &FilterCriteria) -> Vec<usize> {
    let matcher = Matcher::new(criteria);
    vehicles
        .iter()
        .enumerate()
        .filter_map(|(index, vehicle)| matcher.matches(vehicle).then_some(index))
        .collect()
}

// Criteria with the search term lowercased and price bounds parsed once per scan.
struct Matcher<'c> {
    needle: String,
    make: &'c str,
    model: &'c str,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

impl<'c> Matcher<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            needle: criteria.search_term.to_lowercase(),
            make: &criteria.make,
            model: &criteria.model,
            min_price: criteria.min_price_bound(),
            max_price: criteria.max_price_bound(),
        }
    }

    fn matches(&self, vehicle: &Vehicle) -> bool {
        self.matches_search(vehicle)
            && (self.make.is_empty() || vehicle.make == self.make)
            && (self.model.is_empty() || vehicle.model == self.model)
            && self.min_price.is_none_or(|min| vehicle.price >= min)
            && self.max_price.is_none_or(|max| vehicle.price <= max)
    }

    fn matches_search(&self, vehicle: &Vehicle) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let needle = self.needle.as_str();
        vehicle.make.to_lowercase().contains(needle)
            || vehicle.model.to_lowercase().contains(needle)
            || vehicle.year.to_string().contains(needle)
            || vehicle.description.to_lowercase().contains(needle)
            || vehicle
                .features
                .iter()
                .any(|feature| feature.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::vehicle;

    fn collection() -> Vec<Vehicle> {
        let mut camry = vehicle("1", "Toyota", "Camry", 2019, 24000.0);
        camry.features = vec!["Adaptive Cruise Control".to_string()];
        let mut r8 = vehicle("4", "Audi", "R8", 2022, 185000.0);
        r8.description = "Mid-engine V10 supercar".to_string();
        vec![
            camry,
            vehicle("2", "Honda", "Civic", 2021, 21000.0),
            vehicle("3", "Toyota", "RAV4", 2023, 32000.0),
            r8,
            vehicle("5", "Honda", "CR-V", 2018, 19500.0),
        ]
    }

    fn ids(found: &[&Vehicle]) -> Vec<String> {
        found.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn empty_criteria_returns_everything_in_order() {
        let vehicles = collection();
        let found = apply_filters(&vehicles, &FilterCriteria::default());
        assert_eq!(ids(&found), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn searching_a_make_finds_each_vehicle_of_that_make() {
        let vehicles = collection();
        for target in &vehicles {
            let criteria = FilterCriteria::default().with_search_term(target.make.clone());
            let found = apply_filters(&vehicles, &criteria);
            assert!(found.iter().any(|v| v.id == target.id), "missed {}", target.id);
        }
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let vehicles = collection();
        let by_feature = apply_filters(&vehicles, &FilterCriteria::default().with_search_term("cruise"));
        assert_eq!(ids(&by_feature), vec!["1"]);

        let by_description = apply_filters(&vehicles, &FilterCriteria::default().with_search_term("V10"));
        assert_eq!(ids(&by_description), vec!["4"]);

        let by_year = apply_filters(&vehicles, &FilterCriteria::default().with_search_term("2021"));
        assert_eq!(ids(&by_year), vec!["2"]);

        let by_model = apply_filters(&vehicles, &FilterCriteria::default().with_search_term("rav"));
        assert_eq!(ids(&by_model), vec!["3"]);
    }

    #[test]
    fn make_filter_is_exact() {
        let vehicles = collection();
        let found = apply_filters(&vehicles, &FilterCriteria::default().with_make("Toyota"));
        assert!(!found.is_empty());
        assert!(found.iter().all(|v| v.make == "Toyota"));

        let lowercase = apply_filters(&vehicles, &FilterCriteria::default().with_make("toyota"));
        assert!(lowercase.is_empty());
    }

    #[test]
    fn model_filter_applies_without_make() {
        let vehicles = collection();
        let found = apply_filters(&vehicles, &FilterCriteria::default().with_model("Civic"));
        assert_eq!(ids(&found), vec!["2"]);
    }

    #[test]
    fn make_match_with_foreign_model_is_empty() {
        let vehicles = collection();
        let criteria = FilterCriteria::default().with_make("Audi").with_model("A4");
        assert!(apply_filters(&vehicles, &criteria).is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let vehicles = collection();
        let criteria = FilterCriteria::default().with_price_bounds("21000", "24000");
        assert_eq!(ids(&apply_filters(&vehicles, &criteria)), vec!["1", "2"]);
    }

    #[test]
    fn contradictory_price_bounds_match_nothing() {
        let vehicles = collection();
        let criteria = FilterCriteria::default().with_price_bounds("100", "50");
        assert!(apply_filters(&vehicles, &criteria).is_empty());
    }

    #[test]
    fn unparseable_bounds_mean_no_bound() {
        let vehicles = collection();
        let criteria = FilterCriteria::default().with_price_bounds("cheap", "");
        assert_eq!(apply_filters(&vehicles, &criteria).len(), vehicles.len());

        let criteria = FilterCriteria::default().with_price_bounds("inf", "infinity");
        assert_eq!(apply_filters(&vehicles, &criteria).len(), vehicles.len());
    }

    #[test]
    fn trailing_text_after_a_bound_is_ignored() {
        let vehicles = collection();
        let criteria = FilterCriteria::default().with_price_bounds("21000abc", "24000 dollars");
        assert_eq!(ids(&apply_filters(&vehicles, &criteria)), vec!["1", "2"]);
    }

    #[test]
    fn indices_agree_with_filtered_vehicles() {
        let vehicles = collection();
        let criteria = FilterCriteria::default().with_search_term("honda");
        let indices = matching_indices(&vehicles, &criteria);
        let by_index: Vec<&Vehicle> = indices.iter().map(|&i| &vehicles[i]).collect();
        assert_eq!(by_index, apply_filters(&vehicles, &criteria));
    }
}
