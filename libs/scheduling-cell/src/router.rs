// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::services::booking::SchedulingService;

pub fn appointment_routes(service: Arc<SchedulingService>) -> Router {
    Router::new()
        // Booking and cancellation
        .route("/", post(handlers::book_appointment))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .route(
            "/{appointment_id}/cancel",
            post(handlers::cancel_appointment),
        )
        // Client views: upcoming and history are disjoint time partitions
        .route(
            "/clients/{client_id}/upcoming",
            get(handlers::get_upcoming_appointments),
        )
        .route(
            "/clients/{client_id}/history",
            get(handlers::get_appointment_history),
        )
        // Employee views
        .route(
            "/employees/{employee_id}",
            get(handlers::get_employee_appointments),
        )
        .route(
            "/employees/{employee_id}/schedule",
            get(handlers::get_employee_schedule),
        )
        // Pre-booking choice list
        .route("/availability", get(handlers::get_available_employees))
        .with_state(service)
}
