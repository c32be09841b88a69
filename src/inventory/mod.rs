//! Inventory view-model.
//!
//! Derives the filtered, paginated view of the vehicle collection from the
//! current [`FilterCriteria`]. Everything here is a pure derivation over an
//! immutable collection: there is no I/O and nothing can fail, an unmatched
//! query simply yields an empty page.
//!
//! [`Inventory`] owns the collection for the lifetime of the process and
//! memoizes page derivations keyed on `(criteria, page, page_size)`.
//! [`InventoryView`] is the single-owner filter/page state of one browsing
//! session and enforces the reset rules between edits.

mod criteria;
mod facets;
mod filters;
mod pagination;
mod view;

use std::sync::{Arc, Mutex, PoisonError};

use cached::{Cached, SizedCache};

use crate::catalog::{CatalogError, VehicleSource};
use crate::models::Vehicle;

pub use criteria::{FilterCriteria, PRICE_RANGES, PriceRange};
pub use facets::{Facets, facets, models_for_make};
pub use filters::apply_filters;
pub use pagination::{Page, PageLink, clamp_page, page_links, paginate, total_pages};
pub use view::InventoryView;

const MEMO_CAPACITY: usize = 256;

type PageKey = (FilterCriteria, i64, usize);

// Page derivation stored as positions into the collection.
#[derive(Debug, Clone)]
struct PageSlots {
    indices: Vec<usize>,
    page: usize,
    page_size: usize,
    total_pages: usize,
    total_count: usize,
}

pub struct Inventory {
    vehicles: Arc<[Vehicle]>,
    memo: Mutex<SizedCache<PageKey, PageSlots>>,
}

impl std::fmt::Debug for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("vehicles", &self.vehicles.len())
            .finish_non_exhaustive()
    }
}

impl Inventory {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles: vehicles.into(),
            memo: Mutex::new(SizedCache::with_size(MEMO_CAPACITY)),
        }
    }

    pub fn from_source(source: &dyn VehicleSource) -> Result<Self, CatalogError> {
        Ok(Self::new(source.load()?))
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// The first `count` vehicles in collection order, as shown on the home page.
    pub fn featured(&self, count: usize) -> &[Vehicle] {
        &self.vehicles[..count.min(self.vehicles.len())]
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Vehicle> {
        apply_filters(&self.vehicles, criteria)
    }

    pub fn facets(&self, selected_make: Option<&str>) -> Facets {
        facets(&self.vehicles, selected_make)
    }

    pub fn models_for_make(&self, make: &str) -> Vec<String> {
        models_for_make(&self.vehicles, make)
    }

    /// The requested page of vehicles matching `criteria`.
    pub fn page(&self, criteria: &FilterCriteria, page: i64, page_size: usize) -> Page<&Vehicle> {
        let key = (criteria.clone(), page, page_size);
        let slots = {
            let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
            match memo.cache_get(&key) {
                Some(slots) => {
                    tracing::trace!(page, page_size, "Inventory page served from memo");
                    slots.clone()
                }
                None => {
                    let slots = self.derive_page(criteria, page, page_size);
                    memo.cache_set(key, slots.clone());
                    slots
                }
            }
        };

        Page {
            items: slots.indices.iter().map(|&i| &self.vehicles[i]).collect(),
            page: slots.page,
            page_size: slots.page_size,
            total_pages: slots.total_pages,
            total_count: slots.total_count,
        }
    }

    fn derive_page(&self, criteria: &FilterCriteria, page: i64, page_size: usize) -> PageSlots {
        let matching = filters::matching_indices(&self.vehicles, criteria);
        let Page {
            items,
            page,
            page_size,
            total_pages,
            total_count,
        } = paginate(&matching, page, page_size);
        tracing::debug!(total_count, total_pages, page, "Derived inventory page");
        PageSlots {
            indices: items,
            page,
            page_size,
            total_pages,
            total_count,
        }
    }

    #[cfg(test)]
    fn memo_len(&self) -> usize {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner).cache_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticSource;
    use crate::models::fixtures::vehicle;

    fn twelve() -> Vec<Vehicle> {
        let makes = ["Toyota", "Honda", "Audi"];
        (0..12)
            .map(|i| {
                let make = makes[i % 3];
                vehicle(&format!("v{}", i), make, &format!("Model{}", i), 2015 + i as i32, 10_000.0 * (i + 1) as f64)
            })
            .collect()
    }

    #[test]
    fn pages_of_nine_over_twelve_vehicles() {
        let inventory = Inventory::new(twelve());
        let criteria = FilterCriteria::default();

        let first = inventory.page(&criteria, 1, 9);
        assert_eq!(first.items.len(), 9);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items[0].id, "v0");

        let second = inventory.page(&criteria, 2, 9);
        let ids: Vec<&str> = second.items.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v9", "v10", "v11"]);
    }

    #[test]
    fn memoized_pages_match_fresh_derivations() {
        let inventory = Inventory::new(twelve());
        let criteria = FilterCriteria::default().with_make("Honda");

        let first = inventory.page(&criteria, 1, 2);
        assert_eq!(inventory.memo_len(), 1);
        let again = inventory.page(&criteria, 1, 2);
        assert_eq!(inventory.memo_len(), 1);
        assert_eq!(first, again);

        let fresh = paginate(&inventory.filter(&criteria), 1, 2);
        assert_eq!(first, fresh);
    }

    #[test]
    fn lookup_by_id() {
        let inventory = Inventory::from_source(&StaticSource::new(twelve())).unwrap();
        assert_eq!(inventory.get("v3").map(|v| v.make.as_str()), Some("Toyota"));
        assert!(inventory.get("missing").is_none());
        assert_eq!(inventory.len(), 12);
    }

    #[test]
    fn featured_takes_the_head_of_the_collection() {
        let inventory = Inventory::new(twelve());
        let ids: Vec<&str> = inventory.featured(3).iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v0", "v1", "v2"]);
        assert_eq!(inventory.featured(50).len(), 12);
        assert!(Inventory::new(Vec::new()).featured(3).is_empty());
    }

    #[test]
    fn no_match_is_an_empty_page() {
        let inventory = Inventory::new(twelve());
        let criteria = FilterCriteria::default().with_make("Audi").with_model("A4");
        let page = inventory.page(&criteria, 3, 9);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
