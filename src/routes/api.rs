// Handlers for the inventory JSON API

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    inventory::{Facets, FilterCriteria, PRICE_RANGES, Page, PageLink},
    models::Vehicle,
    AppState,
};

// --- Response Wrappers ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InventoryResponse<'a> {
    items: Vec<&'a Vehicle>,
    page: usize,
    page_size: usize,
    total_pages: usize,
    total_count: usize,
    summary: String,
    page_links: Vec<PageLink>,
    criteria: FilterCriteria,
    facets: Facets,
    #[serde(skip_serializing_if = "Option::is_none")]
    empty_state: Option<EmptyState>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmptyState {
    title: &'static str,
    hint: &'static str,
    clear_filters_href: &'static str,
}

const NO_RESULTS: EmptyState = EmptyState {
    title: "No vehicles match your criteria.",
    hint: "Try adjusting your filters or view all vehicles.",
    clear_filters_href: "/api/inventory",
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VehicleResponse<'a> {
    display_name: String,
    #[serde(flatten)]
    vehicle: &'a Vehicle,
}

// --- Request Structs ---

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    #[serde(flatten)]
    criteria: FilterCriteria,
    page: Option<String>,
    page_size: Option<String>,
}

impl InventoryQuery {
    // Unparseable page numbers fall back to the first page like any other bad input.
    fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }

    fn page_size(&self, default: usize, max: usize) -> Result<usize, AppError> {
        match self.page_size.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(raw) => match raw.parse::<usize>() {
                Ok(size) if (1..=max).contains(&size) => Ok(size),
                _ => Err(AppError::BadRequest(format!(
                    "pageSize must be a whole number between 1 and {}",
                    max
                ))),
            },
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct FeaturedQuery {
    count: Option<String>,
}

// Home page teaser size
const FEATURED_COUNT: usize = 3;

impl FeaturedQuery {
    fn count(&self, max: usize) -> Result<usize, AppError> {
        match self.count.as_deref().map(str::trim) {
            None | Some("") => Ok(FEATURED_COUNT.min(max)),
            Some(raw) => match raw.parse::<usize>() {
                Ok(count) if (1..=max).contains(&count) => Ok(count),
                _ => Err(AppError::BadRequest(format!(
                    "count must be a whole number between 1 and {}",
                    max
                ))),
            },
        }
    }
}

// --- API Handlers ---

pub async fn get_inventory(
    State(app_state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Response, AppError> {
    tracing::info!("[HANDLER] /api/inventory - Request received.");
    tracing::debug!("[HANDLER] /api/inventory - Query: {:?}", query);

    let page_size = query.page_size(app_state.settings.page_size, app_state.settings.page_size_max)?;
    let inventory = &app_state.inventory;
    let page: Page<&Vehicle> = inventory.page(&query.criteria, query.page(), page_size);

    tracing::info!(
        "[HANDLER] /api/inventory - {} matching vehicles, page {} of {}.",
        page.total_count,
        page.page,
        page.total_pages
    );

    let response = InventoryResponse {
        summary: page.summary(),
        page_links: page.links(),
        facets: inventory.facets(Some(query.criteria.make.as_str())),
        empty_state: page.is_empty().then_some(NO_RESULTS),
        items: page.items,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
        total_count: page.total_count,
        criteria: query.criteria,
    };
    Ok(Json(response).into_response())
}

pub async fn get_featured(
    State(app_state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Result<Response, AppError> {
    tracing::info!("[HANDLER] /api/featured - Request received.");
    let count = query.count(app_state.settings.page_size_max)?;
    let featured = app_state.inventory.featured(count);
    tracing::debug!("[HANDLER] /api/featured - Returning {} vehicles.", featured.len());
    Ok(Json(featured).into_response())
}

pub async fn get_makes(State(app_state): State<AppState>) -> impl IntoResponse {
    tracing::info!("[HANDLER] /api/makes - Request received.");
    let makes = app_state.inventory.facets(None).makes;
    tracing::debug!("[HANDLER] /api/makes - Returning {} makes.", makes.len());
    Json(makes)
}

pub async fn get_all_models(State(app_state): State<AppState>) -> impl IntoResponse {
    tracing::info!("[HANDLER] /api/models - Request received.");
    Json(app_state.inventory.facets(None).models)
}

pub async fn get_models(
    State(app_state): State<AppState>,
    Path(make): Path<String>,
) -> impl IntoResponse {
    tracing::info!("[HANDLER] /api/models/:make - Request received for make: {}", make);
    let models = app_state.inventory.models_for_make(&make);
    if models.is_empty() {
        tracing::debug!("[HANDLER] /api/models/:make - No models for make '{}'.", make);
    }
    Json(models)
}

pub async fn get_price_ranges() -> impl IntoResponse {
    Json(PRICE_RANGES)
}

pub async fn get_vehicle(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    tracing::info!("[HANDLER] /api/vehicles/:id - Request received for id: {}", id);

    let vehicle = app_state
        .inventory
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Vehicle '{}' not found", id)))?;

    let response = VehicleResponse {
        display_name: vehicle.display_name(),
        vehicle,
    };
    Ok(Json(response).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, page_size: Option<&str>) -> InventoryQuery {
        InventoryQuery {
            criteria: FilterCriteria::default(),
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn page_falls_back_to_first() {
        assert_eq!(query(None, None).page(), 1);
        assert_eq!(query(Some("abc"), None).page(), 1);
        assert_eq!(query(Some("-5"), None).page(), -5);
    }

    #[test]
    fn featured_count_defaults_and_is_bounded() {
        let featured = |count: Option<&str>| FeaturedQuery { count: count.map(str::to_string) };
        assert_eq!(featured(None).count(48).unwrap(), 3);
        assert_eq!(featured(Some("5")).count(48).unwrap(), 5);
        assert_eq!(featured(None).count(2).unwrap(), 2);
        assert!(featured(Some("0")).count(48).is_err());
        assert!(featured(Some("many")).count(48).is_err());
    }

    #[test]
    fn page_size_is_bounded() {
        assert_eq!(query(None, None).page_size(12, 48).unwrap(), 12);
        assert_eq!(query(None, Some("9")).page_size(12, 48).unwrap(), 9);
        assert!(query(None, Some("0")).page_size(12, 48).is_err());
        assert!(query(None, Some("49")).page_size(12, 48).is_err());
        assert!(query(None, Some("lots")).page_size(12, 48).is_err());
    }
}
