// libs/scheduling-cell/src/services/availability.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use catalog_cell::models::Employee;
use catalog_cell::store::CatalogReader;

use crate::store::AppointmentStore;

/// Answers "is this employee free at this exact instant" against the
/// appointment store, and intersects that with the capability graph for the
/// pre-booking choice list.
#[derive(Clone)]
pub struct AvailabilityChecker {
    store: Arc<dyn AppointmentStore>,
    catalog: Arc<dyn CatalogReader>,
}

impl AvailabilityChecker {
    pub fn new(store: Arc<dyn AppointmentStore>, catalog: Arc<dyn CatalogReader>) -> Self {
        Self { store, catalog }
    }

    /// True iff no stored appointment holds the (employee, timestamp) pair.
    pub async fn is_free(&self, employee_id: Uuid, at: DateTime<Utc>) -> bool {
        self.store.is_slot_free(employee_id, at).await
    }

    /// Employees qualified for the service with no appointment at the given
    /// instant. Advisory: the result can go stale between query and booking,
    /// so the authoritative check happens again inside the atomic insert.
    pub async fn free_employees_for(
        &self,
        service_id: Uuid,
        at: DateTime<Utc>,
    ) -> Vec<Employee> {
        let qualified = self.catalog.employees_for(service_id).await;
        debug!(
            "{} qualified employees for service {} at {}",
            qualified.len(),
            service_id,
            at
        );

        let mut free = Vec::new();
        for employee_id in qualified {
            if self.is_free(employee_id, at).await {
                if let Some(employee) = self.catalog.employee(employee_id).await {
                    free.push(employee);
                }
            }
        }
        free.sort_by(|a, b| a.name.cmp(&b.name));
        free
    }
}
