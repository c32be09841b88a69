use std::sync::Arc;

use super::{Facets, FilterCriteria, Inventory, Page, PriceRange, total_pages};
use crate::models::Vehicle;

/// Filter and page state of one browsing session.
///
/// Starts with empty criteria on page 1. Any edit that changes the criteria
/// sends the view back to page 1. While a make is selected the model is limited
/// to the models that make offers: picking a make drops a foreign model, and
/// selecting a foreign model is ignored.
#[derive(Debug, Clone)]
pub struct InventoryView {
    inventory: Arc<Inventory>,
    criteria: FilterCriteria,
    page: i64,
    page_size: usize,
}

impl InventoryView {
    pub fn new(inventory: Arc<Inventory>, page_size: usize) -> Self {
        Self {
            inventory,
            criteria: FilterCriteria::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page_number(&self) -> i64 {
        self.page
    }

    pub fn set_search_term(&mut self, search_term: &str) {
        self.update(|c| c.search_term = search_term.to_string());
    }

    pub fn set_make(&mut self, make: &str) {
        let keep_model = self.offers(make, &self.criteria.model);
        self.update(|c| {
            c.make = make.to_string();
            if !keep_model {
                c.model.clear();
            }
        });
    }

    /// Returns false, leaving the criteria untouched, when the selected make
    /// does not offer `model`.
    pub fn set_model(&mut self, model: &str) -> bool {
        if !self.offers(&self.criteria.make, model) {
            tracing::debug!(make = %self.criteria.make, model, "Ignoring model not offered by make");
            return false;
        }
        self.update(|c| c.model = model.to_string());
        true
    }

    pub fn set_min_price(&mut self, min_price: &str) {
        self.update(|c| c.min_price = min_price.to_string());
    }

    pub fn set_max_price(&mut self, max_price: &str) {
        self.update(|c| c.max_price = max_price.to_string());
    }

    pub fn apply_price_range(&mut self, range: &PriceRange) {
        self.update(|c| {
            c.min_price = range.min.to_string();
            c.max_price = range.max.to_string();
        });
    }

    /// Replaces the whole criteria set, e.g. from a query string. A model the
    /// make does not offer is dropped.
    pub fn set_criteria(&mut self, mut criteria: FilterCriteria) {
        if !self.offers(&criteria.make, &criteria.model) {
            criteria.model.clear();
        }
        self.update(|c| *c = criteria);
    }

    fn offers(&self, make: &str, model: &str) -> bool {
        make.is_empty()
            || model.is_empty()
            || self.inventory.models_for_make(make).iter().any(|m| m == model)
    }

    pub fn reset_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    fn update(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        let before = self.criteria.clone();
        edit(&mut self.criteria);
        if self.criteria != before {
            tracing::debug!(criteria = ?self.criteria, "Filter criteria changed, back to page 1");
            self.page = 1;
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.inventory.filter(&self.criteria).len(), self.page_size)
    }

    /// Moves to `page` when it exists; out-of-range targets are ignored.
    pub fn go_to(&mut self, page: i64) -> bool {
        let last = self.total_pages() as i64;
        if page >= 1 && page <= last {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to(self.current_page() as i64 + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to(self.current_page() as i64 - 1)
    }

    pub fn current_page(&self) -> usize {
        self.current().page
    }

    pub fn current(&self) -> Page<&Vehicle> {
        self.inventory.page(&self.criteria, self.page, self.page_size)
    }

    pub fn facets(&self) -> Facets {
        self.inventory.facets(Some(self.criteria.make.as_str()))
    }
}
