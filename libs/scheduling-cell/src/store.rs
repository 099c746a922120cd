// libs/scheduling-cell/src/store.rs
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use catalog_cell::store::AppointmentIndex;

use crate::models::Appointment;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Slot already taken for employee {employee_id} at {at}")]
    SlotTaken {
        employee_id: Uuid,
        at: DateTime<Utc>,
    },
}

/// Durable collection of booked appointments. Insert enforces the
/// (employee, timestamp) uniqueness constraint: a violation fails with
/// `SlotTaken` and nothing is persisted. A SQL-backed implementation would
/// put a unique index on that pair and map the constraint violation the
/// same way.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert(&self, appointment: Appointment) -> Result<Appointment, StoreError>;

    /// Returns false if the id was not present.
    async fn delete(&self, id: Uuid) -> bool;

    async fn find_by_id(&self, id: Uuid) -> Option<Appointment>;

    /// All appointments for a client, timestamp descending.
    async fn find_by_client(&self, client_id: Uuid) -> Vec<Appointment>;

    /// All appointments for an employee, timestamp descending.
    async fn find_by_employee(&self, employee_id: Uuid) -> Vec<Appointment>;

    /// All appointments on a calendar date, timestamp ascending.
    async fn find_on_date(&self, date: NaiveDate) -> Vec<Appointment>;

    /// Client appointments with timestamp > now, ascending.
    async fn upcoming_for_client(&self, client_id: Uuid) -> Vec<Appointment>;

    /// Client appointments with timestamp <= now, descending.
    async fn history_for_client(&self, client_id: Uuid) -> Vec<Appointment>;

    /// True iff no stored appointment holds this exact (employee, timestamp)
    /// pair. Advisory for reads; the authoritative check is `insert`.
    async fn is_slot_free(&self, employee_id: Uuid, at: DateTime<Utc>) -> bool;
}

#[derive(Default)]
struct StoreState {
    appointments: HashMap<Uuid, Appointment>,
    // Slot index: the uniqueness constraint on (employee, timestamp).
    slots: HashMap<(Uuid, DateTime<Utc>), Uuid>,
}

/// In-memory `AppointmentStore`. The check-and-insert in `insert` happens
/// under a single write-lock acquisition, so two competing bookings for the
/// same slot can never interleave between check and insert.
#[derive(Default)]
pub struct MemoryAppointmentStore {
    state: RwLock<StoreState>,
}

impl MemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for MemoryAppointmentStore {
    async fn insert(&self, appointment: Appointment) -> Result<Appointment, StoreError> {
        let mut state = self.state.write().await;

        let key = (appointment.employee_id, appointment.scheduled_at);
        if let Some(holder) = state.slots.get(&key) {
            debug!(
                "Slot ({}, {}) already held by appointment {}",
                appointment.employee_id, appointment.scheduled_at, holder
            );
            return Err(StoreError::SlotTaken {
                employee_id: appointment.employee_id,
                at: appointment.scheduled_at,
            });
        }

        state.slots.insert(key, appointment.id);
        state.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn delete(&self, id: Uuid) -> bool {
        let mut state = self.state.write().await;
        match state.appointments.remove(&id) {
            Some(appointment) => {
                state
                    .slots
                    .remove(&(appointment.employee_id, appointment.scheduled_at));
                true
            }
            None => false,
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Option<Appointment> {
        self.state.read().await.appointments.get(&id).cloned()
    }

    async fn find_by_client(&self, client_id: Uuid) -> Vec<Appointment> {
        let state = self.state.read().await;
        let mut found: Vec<Appointment> = state
            .appointments
            .values()
            .filter(|a| a.client_id == client_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        found
    }

    async fn find_by_employee(&self, employee_id: Uuid) -> Vec<Appointment> {
        let state = self.state.read().await;
        let mut found: Vec<Appointment> = state
            .appointments
            .values()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        found
    }

    async fn find_on_date(&self, date: NaiveDate) -> Vec<Appointment> {
        let state = self.state.read().await;
        let mut found: Vec<Appointment> = state
            .appointments
            .values()
            .filter(|a| a.scheduled_at.date_naive() == date)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
        found
    }

    async fn upcoming_for_client(&self, client_id: Uuid) -> Vec<Appointment> {
        let now = Utc::now();
        let state = self.state.read().await;
        let mut found: Vec<Appointment> = state
            .appointments
            .values()
            .filter(|a| a.client_id == client_id && a.scheduled_at > now)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
        found
    }

    async fn history_for_client(&self, client_id: Uuid) -> Vec<Appointment> {
        let now = Utc::now();
        let state = self.state.read().await;
        let mut found: Vec<Appointment> = state
            .appointments
            .values()
            .filter(|a| a.client_id == client_id && a.scheduled_at <= now)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        found
    }

    async fn is_slot_free(&self, employee_id: Uuid, at: DateTime<Utc>) -> bool {
        !self
            .state
            .read()
            .await
            .slots
            .contains_key(&(employee_id, at))
    }
}

#[async_trait]
impl AppointmentIndex for MemoryAppointmentStore {
    async fn references_client(&self, client_id: Uuid) -> bool {
        self.state
            .read()
            .await
            .appointments
            .values()
            .any(|a| a.client_id == client_id)
    }

    async fn references_employee(&self, employee_id: Uuid) -> bool {
        self.state
            .read()
            .await
            .appointments
            .values()
            .any(|a| a.employee_id == employee_id)
    }

    async fn references_service(&self, service_id: Uuid) -> bool {
        self.state
            .read()
            .await
            .appointments
            .values()
            .any(|a| a.service_id == service_id)
    }
}
