// libs/scheduling-cell/src/services/validation.rs
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use catalog_cell::store::CatalogReader;

use crate::models::{BookAppointmentRequest, BookingError};
use crate::services::availability::AvailabilityChecker;

/// Decides whether a proposed appointment may be created. Pure decision:
/// no side effects, the caller persists. Checks run cheapest-first and
/// short-circuit on the first failure:
/// 1. temporal (plain comparison),
/// 2. availability (the check most likely to fail under contention),
/// 3. capability (graph lookup).
#[derive(Clone)]
pub struct BookingValidator {
    availability: AvailabilityChecker,
    catalog: Arc<dyn CatalogReader>,
}

impl BookingValidator {
    pub fn new(availability: AvailabilityChecker, catalog: Arc<dyn CatalogReader>) -> Self {
        Self {
            availability,
            catalog,
        }
    }

    pub async fn validate(&self, proposal: &BookAppointmentRequest) -> Result<(), BookingError> {
        if proposal.scheduled_at <= Utc::now() {
            return Err(BookingError::PastOrPresentTimestamp);
        }

        if !self
            .availability
            .is_free(proposal.employee_id, proposal.scheduled_at)
            .await
        {
            return Err(BookingError::EmployeeUnavailable);
        }

        if !self
            .catalog
            .is_qualified(proposal.employee_id, proposal.service_id)
            .await
        {
            return Err(BookingError::EmployeeNotQualified);
        }

        debug!(
            "Proposal accepted: employee {} for service {} at {}",
            proposal.employee_id, proposal.service_id, proposal.scheduled_at
        );
        Ok(())
    }
}
