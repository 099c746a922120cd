// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{BookAppointmentRequest, BookingError, CancelAppointmentRequest};
use crate::services::booking::SchedulingService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub service_id: Uuid,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub date: NaiveDate,
}

fn booking_error(e: BookingError) -> AppError {
    match e {
        BookingError::PastOrPresentTimestamp => {
            AppError::BadRequest("Appointment must be scheduled in the future".to_string())
        }
        BookingError::EmployeeUnavailable => {
            AppError::Conflict("Employee already has an appointment at this time".to_string())
        }
        BookingError::EmployeeNotQualified => {
            AppError::Validation("Employee is not qualified to perform this service".to_string())
        }
        BookingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        BookingError::ClientNotFound => AppError::NotFound("Client not found".to_string()),
        BookingError::EmployeeNotFound => AppError::NotFound("Employee not found".to_string()),
        BookingError::ServiceNotFound => AppError::NotFound("Service not found".to_string()),
        BookingError::NotOwner => {
            AppError::Forbidden("Appointment belongs to a different client".to_string())
        }
        BookingError::AlreadyPast => {
            AppError::BadRequest("Appointment is already in the past".to_string())
        }
        BookingError::Storage(msg) => AppError::Storage(msg),
    }
}

// ==============================================================================
// BOOKING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(service): State<Arc<SchedulingService>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.book(request).await.map_err(booking_error)?;
    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(service): State<Arc<SchedulingService>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    service
        .cancel(appointment_id, request.client_id)
        .await
        .map_err(booking_error)?;
    Ok(Json(json!({ "success": true })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(service): State<Arc<SchedulingService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    service.delete(appointment_id).await.map_err(booking_error)?;
    Ok(Json(json!({ "success": true })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(service): State<Arc<SchedulingService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = service
        .appointment(appointment_id)
        .await
        .map_err(booking_error)?;
    Ok(Json(json!({ "appointment": appointment })))
}

// ==============================================================================
// LISTING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_upcoming_appointments(
    State(service): State<Arc<SchedulingService>>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.upcoming_for(client_id).await;
    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn get_appointment_history(
    State(service): State<Arc<SchedulingService>>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.history_for(client_id).await;
    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn get_employee_appointments(
    State(service): State<Arc<SchedulingService>>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.for_employee(employee_id).await;
    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn get_employee_schedule(
    State(service): State<Arc<SchedulingService>>,
    Path(employee_id): Path<Uuid>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.for_employee_on_date(employee_id, query.date).await;
    Ok(Json(json!({
        "date": query.date,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn get_available_employees(
    State(service): State<Arc<SchedulingService>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let employees = service
        .available_employees(query.service_id, query.at)
        .await
        .map_err(booking_error)?;
    Ok(Json(json!({
        "service_id": query.service_id,
        "at": query.at,
        "employees": employees
    })))
}
