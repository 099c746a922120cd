// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODEL
// ==============================================================================

/// A booked appointment: one client, one service, one employee, one instant.
/// The (employee_id, scheduled_at) pair is the atomic unit of contention;
/// there is no duration field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub employee_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Derived, never stored: an appointment becomes read-only history once
    /// its timestamp elapses.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at <= now
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub employee_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    /// The client requesting the cancellation; must own the appointment.
    pub client_id: Uuid,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

/// Booking and cancellation outcomes. Validation rejections are expected
/// business results, returned as values and presented to the end user;
/// only `Storage` marks a genuine infrastructure fault.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("Appointment must be scheduled in the future")]
    PastOrPresentTimestamp,

    #[error("Employee already has an appointment at this time")]
    EmployeeUnavailable,

    #[error("Employee is not qualified to perform this service")]
    EmployeeNotQualified,

    #[error("Appointment not found")]
    NotFound,

    #[error("Client not found")]
    ClientNotFound,

    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Service not found")]
    ServiceNotFound,

    #[error("Appointment belongs to a different client")]
    NotOwner,

    #[error("Appointment is already in the past")]
    AlreadyPast,

    #[error("Storage error: {0}")]
    Storage(String),
}
