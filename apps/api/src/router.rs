use std::sync::Arc;

use axum::{routing::get, Router};

use catalog_cell::router::catalog_routes;
use catalog_cell::store::CatalogStore;
use scheduling_cell::router::appointment_routes;
use scheduling_cell::services::booking::SchedulingService;

pub fn create_router(scheduling: Arc<SchedulingService>, catalog: Arc<CatalogStore>) -> Router {
    Router::new()
        .route("/", get(|| async { "Scheduling API is running!" }))
        .nest("/appointments", appointment_routes(scheduling))
        .nest("/catalog", catalog_routes(catalog))
}
