// libs/catalog-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::store::CatalogStore;

pub fn catalog_routes(store: Arc<CatalogStore>) -> Router {
    Router::new()
        // Client records
        .route("/clients", post(handlers::create_client))
        .route("/clients", get(handlers::list_clients))
        .route("/clients/{client_id}", get(handlers::get_client))
        .route("/clients/{client_id}", delete(handlers::delete_client))
        // Employee records
        .route("/employees", post(handlers::create_employee))
        .route("/employees", get(handlers::list_employees))
        .route("/employees/{employee_id}", get(handlers::get_employee))
        .route("/employees/{employee_id}", delete(handlers::delete_employee))
        .route(
            "/employees/{employee_id}/services",
            get(handlers::get_employee_services),
        )
        // Service records
        .route("/services", post(handlers::create_service))
        .route("/services", get(handlers::list_services))
        .route("/services/{service_id}", get(handlers::get_service))
        .route("/services/{service_id}", delete(handlers::delete_service))
        .route(
            "/services/{service_id}/employees",
            get(handlers::get_service_employees),
        )
        // Capability graph edges
        .route(
            "/services/{service_id}/employees/{employee_id}",
            post(handlers::assign_employee),
        )
        .route(
            "/services/{service_id}/employees/{employee_id}",
            delete(handlers::unassign_employee),
        )
        .with_state(store)
}
