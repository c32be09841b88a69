// Route definitions

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{session, AppState};

mod api;
mod auth;

pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/inventory", get(api::get_inventory))
        .route("/featured", get(api::get_featured))
        .route("/makes", get(api::get_makes))
        .route("/models", get(api::get_all_models))
        .route("/models/:make", get(api::get_models))
        .route("/price-ranges", get(api::get_price_ranges))
        .route("/vehicles/:id", get(api::get_vehicle))
        .with_state(app_state.clone());

    Router::new()
        .route("/auth/signin", get(auth::signin_page))
        .route("/auth/signup", get(auth::signup_page))
        .route("/dashboard", get(auth::dashboard))
        .nest("/api", api_router)
        // Session resolution and redirect rules run ahead of every route
        .layer(middleware::from_fn_with_state(app_state.clone(), session::route_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
