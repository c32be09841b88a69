//! Magari 360 / Rivent inventory service.
//!
//! Serves the vehicle inventory of the storefront as JSON: filtered and
//! paginated listings, make/model facets, vehicle details, and the session
//! gate in front of the placeholder dashboard.

use std::sync::Arc;

use axum::extract::FromRef;

pub mod catalog;
pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod routes;
pub mod session;

use crate::{config::Settings, inventory::Inventory};

// Shared, read-only application state
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub inventory: Arc<Inventory>,
}

impl AppState {
    pub fn new(settings: Settings, inventory: Inventory) -> Self {
        Self {
            settings: Arc::new(settings),
            inventory: Arc::new(inventory),
        }
    }
}
