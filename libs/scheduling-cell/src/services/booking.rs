// libs/scheduling-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use catalog_cell::models::Employee;
use catalog_cell::store::CatalogReader;

use crate::models::{Appointment, BookAppointmentRequest, BookingError};
use crate::services::availability::AvailabilityChecker;
use crate::services::validation::BookingValidator;
use crate::store::{AppointmentStore, StoreError};

/// The public operation surface of the scheduling engine. Every write goes
/// through the validator and then the store's atomic check-and-insert.
pub struct SchedulingService {
    store: Arc<dyn AppointmentStore>,
    catalog: Arc<dyn CatalogReader>,
    availability: AvailabilityChecker,
    validator: BookingValidator,
}

impl SchedulingService {
    pub fn new(store: Arc<dyn AppointmentStore>, catalog: Arc<dyn CatalogReader>) -> Self {
        let availability = AvailabilityChecker::new(Arc::clone(&store), Arc::clone(&catalog));
        let validator = BookingValidator::new(availability.clone(), Arc::clone(&catalog));

        Self {
            store,
            catalog,
            availability,
            validator,
        }
    }

    /// Book an appointment for a client with a specific employee at an exact
    /// instant. The validator's availability verdict is advisory; the insert
    /// re-asserts it atomically, so exactly one of N concurrent bookings for
    /// the same slot wins.
    pub async fn book(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        info!(
            "Booking request: client {} / service {} / employee {} at {}",
            request.client_id, request.service_id, request.employee_id, request.scheduled_at
        );

        // Sub-second precision would make "exact timestamp" unstable across
        // serialization, so the slot key is truncated to whole seconds.
        let scheduled_at = request
            .scheduled_at
            .with_nanosecond(0)
            .unwrap_or(request.scheduled_at);
        let request = BookAppointmentRequest {
            scheduled_at,
            ..request
        };

        // Existence checks for the three referenced records.
        if !self.catalog.client_exists(request.client_id).await {
            return Err(BookingError::ClientNotFound);
        }
        if !self.catalog.employee_exists(request.employee_id).await {
            return Err(BookingError::EmployeeNotFound);
        }
        if !self.catalog.service_exists(request.service_id).await {
            return Err(BookingError::ServiceNotFound);
        }

        self.validator.validate(&request).await?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            client_id: request.client_id,
            service_id: request.service_id,
            employee_id: request.employee_id,
            scheduled_at: request.scheduled_at,
            created_at: Utc::now(),
        };

        // A competing booking may have claimed the slot since the validator
        // looked; the store's uniqueness constraint is the authority.
        let appointment = self.store.insert(appointment).await.map_err(|e| match e {
            StoreError::SlotTaken { employee_id, at } => {
                warn!(
                    "Lost booking race for employee {} at {}",
                    employee_id, at
                );
                BookingError::EmployeeUnavailable
            }
        })?;

        info!("Appointment {} booked", appointment.id);
        Ok(appointment)
    }

    /// Cancel an appointment on behalf of its owning client. Past
    /// appointments are immutable history and cannot be cancelled.
    pub async fn cancel(
        &self,
        appointment_id: Uuid,
        requesting_client_id: Uuid,
    ) -> Result<(), BookingError> {
        debug!(
            "Cancellation request for appointment {} by client {}",
            appointment_id, requesting_client_id
        );

        let appointment = self
            .store
            .find_by_id(appointment_id)
            .await
            .ok_or(BookingError::NotFound)?;

        if appointment.client_id != requesting_client_id {
            return Err(BookingError::NotOwner);
        }
        if appointment.is_past(Utc::now()) {
            return Err(BookingError::AlreadyPast);
        }

        if !self.store.delete(appointment_id).await {
            // Removed between lookup and delete.
            return Err(BookingError::NotFound);
        }

        info!("Appointment {} cancelled", appointment_id);
        Ok(())
    }

    /// Administrative removal: no ownership or temporal rule.
    pub async fn delete(&self, appointment_id: Uuid) -> Result<(), BookingError> {
        if !self.store.delete(appointment_id).await {
            return Err(BookingError::NotFound);
        }
        info!("Appointment {} deleted", appointment_id);
        Ok(())
    }

    pub async fn appointment(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        self.store
            .find_by_id(appointment_id)
            .await
            .ok_or(BookingError::NotFound)
    }

    /// Future appointments for a client, soonest first.
    pub async fn upcoming_for(&self, client_id: Uuid) -> Vec<Appointment> {
        self.store.upcoming_for_client(client_id).await
    }

    /// Elapsed appointments for a client, most recent first.
    pub async fn history_for(&self, client_id: Uuid) -> Vec<Appointment> {
        self.store.history_for_client(client_id).await
    }

    /// Full schedule for an employee, most recent first.
    pub async fn for_employee(&self, employee_id: Uuid) -> Vec<Appointment> {
        self.store.find_by_employee(employee_id).await
    }

    /// An employee's appointments on a single calendar date, chronological.
    pub async fn for_employee_on_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Vec<Appointment> {
        self.store
            .find_on_date(date)
            .await
            .into_iter()
            .filter(|a| a.employee_id == employee_id)
            .collect()
    }

    /// Qualified employees with the given instant still free. Advisory
    /// choice list; booking re-checks atomically.
    pub async fn available_employees(
        &self,
        service_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Vec<Employee>, BookingError> {
        if !self.catalog.service_exists(service_id).await {
            return Err(BookingError::ServiceNotFound);
        }
        let at = at.with_nanosecond(0).unwrap_or(at);
        Ok(self.availability.free_employees_for(service_id, at).await)
    }
}
