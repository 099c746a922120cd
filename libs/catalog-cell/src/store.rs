// libs/catalog-cell/src/store.rs
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    Client, CreateClientRequest, CreateEmployeeRequest, CreateServiceRequest, CatalogError,
    Employee, Service,
};

/// Narrow read surface the scheduling engine consumes. Existence checks for
/// ids passed into a booking, plus capability graph lookups.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn client_exists(&self, id: Uuid) -> bool;
    async fn employee_exists(&self, id: Uuid) -> bool;
    async fn service_exists(&self, id: Uuid) -> bool;
    async fn employee(&self, id: Uuid) -> Option<Employee>;
    async fn is_qualified(&self, employee_id: Uuid, service_id: Uuid) -> bool;
    async fn employees_for(&self, service_id: Uuid) -> HashSet<Uuid>;
    async fn services_for(&self, employee_id: Uuid) -> HashSet<Uuid>;
}

/// Reverse lookup into the appointment store, used to refuse deletes that
/// would orphan appointment references. Implemented by the scheduling
/// store and injected at wiring time.
#[async_trait]
pub trait AppointmentIndex: Send + Sync {
    async fn references_client(&self, client_id: Uuid) -> bool;
    async fn references_employee(&self, employee_id: Uuid) -> bool;
    async fn references_service(&self, service_id: Uuid) -> bool;
}

#[derive(Default)]
struct CatalogState {
    clients: HashMap<Uuid, Client>,
    employees: HashMap<Uuid, Employee>,
    services: HashMap<Uuid, Service>,
    // Capability graph, mirrored in both directions under the same lock so
    // the two indexes never disagree.
    by_service: HashMap<Uuid, HashSet<Uuid>>,
    by_employee: HashMap<Uuid, HashSet<Uuid>>,
}

pub struct CatalogStore {
    state: RwLock<CatalogState>,
    appointments: Arc<dyn AppointmentIndex>,
}

impl CatalogStore {
    pub fn new(appointments: Arc<dyn AppointmentIndex>) -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
            appointments,
        }
    }

    // ==========================================================================
    // CLIENTS
    // ==========================================================================

    pub async fn create_client(&self, request: CreateClientRequest) -> Result<Client, CatalogError> {
        let mut state = self.state.write().await;

        let email = request.email.trim().to_lowercase();
        if state.clients.values().any(|c| c.email == email) {
            return Err(CatalogError::DuplicateEmail(email));
        }

        let client = Client {
            id: Uuid::new_v4(),
            name: request.name,
            email,
            address: request.address,
            credential: request.credential,
            created_at: Utc::now(),
        };
        state.clients.insert(client.id, client.clone());

        info!("Client {} registered", client.id);
        Ok(client)
    }

    pub async fn client(&self, id: Uuid) -> Option<Client> {
        self.state.read().await.clients.get(&id).cloned()
    }

    pub async fn list_clients(&self) -> Vec<Client> {
        let state = self.state.read().await;
        let mut clients: Vec<Client> = state.clients.values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        clients
    }

    /// Refuses the delete while any appointment still references the client.
    pub async fn delete_client(&self, id: Uuid) -> Result<(), CatalogError> {
        if self.appointments.references_client(id).await {
            return Err(CatalogError::ReferencedByAppointment { entity: "Client" });
        }

        let mut state = self.state.write().await;
        state
            .clients
            .remove(&id)
            .map(|_| debug!("Client {} deleted", id))
            .ok_or(CatalogError::NotFound)
    }

    // ==========================================================================
    // EMPLOYEES
    // ==========================================================================

    pub async fn create_employee(
        &self,
        request: CreateEmployeeRequest,
    ) -> Result<Employee, CatalogError> {
        let mut state = self.state.write().await;

        let email = request.email.trim().to_lowercase();
        if state.employees.values().any(|e| e.email == email) {
            return Err(CatalogError::DuplicateEmail(email));
        }

        let employee = Employee {
            id: Uuid::new_v4(),
            name: request.name,
            email,
            credential: request.credential,
            created_at: Utc::now(),
        };
        state.employees.insert(employee.id, employee.clone());

        info!("Employee {} registered", employee.id);
        Ok(employee)
    }

    pub async fn get_employee(&self, id: Uuid) -> Option<Employee> {
        self.state.read().await.employees.get(&id).cloned()
    }

    pub async fn list_employees(&self) -> Vec<Employee> {
        let state = self.state.read().await;
        let mut employees: Vec<Employee> = state.employees.values().cloned().collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        employees
    }

    /// Refuses the delete while any appointment still references the
    /// employee. On success the employee's capability edges go with it.
    pub async fn delete_employee(&self, id: Uuid) -> Result<(), CatalogError> {
        if self.appointments.references_employee(id).await {
            return Err(CatalogError::ReferencedByAppointment { entity: "Employee" });
        }

        let mut state = self.state.write().await;
        if state.employees.remove(&id).is_none() {
            return Err(CatalogError::NotFound);
        }
        if let Some(services) = state.by_employee.remove(&id) {
            for service_id in services {
                if let Some(employees) = state.by_service.get_mut(&service_id) {
                    employees.remove(&id);
                }
            }
        }
        debug!("Employee {} deleted", id);
        Ok(())
    }

    // ==========================================================================
    // SERVICES
    // ==========================================================================

    pub async fn create_service(
        &self,
        request: CreateServiceRequest,
    ) -> Result<Service, CatalogError> {
        let mut state = self.state.write().await;

        // Service names are unique case-insensitively.
        let lowered = request.name.trim().to_lowercase();
        if state.services.values().any(|s| s.name.to_lowercase() == lowered) {
            return Err(CatalogError::DuplicateServiceName(request.name));
        }

        let service = Service {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            description: request.description,
            created_at: Utc::now(),
        };
        state.services.insert(service.id, service.clone());

        info!("Service {} ({}) registered", service.name, service.id);
        Ok(service)
    }

    pub async fn service(&self, id: Uuid) -> Option<Service> {
        self.state.read().await.services.get(&id).cloned()
    }

    pub async fn list_services(&self) -> Vec<Service> {
        let state = self.state.read().await;
        let mut services: Vec<Service> = state.services.values().cloned().collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        services
    }

    pub async fn delete_service(&self, id: Uuid) -> Result<(), CatalogError> {
        if self.appointments.references_service(id).await {
            return Err(CatalogError::ReferencedByAppointment { entity: "Service" });
        }

        let mut state = self.state.write().await;
        if state.services.remove(&id).is_none() {
            return Err(CatalogError::NotFound);
        }
        if let Some(employees) = state.by_service.remove(&id) {
            for employee_id in employees {
                if let Some(services) = state.by_employee.get_mut(&employee_id) {
                    services.remove(&id);
                }
            }
        }
        debug!("Service {} deleted", id);
        Ok(())
    }

    // ==========================================================================
    // CAPABILITY GRAPH
    // ==========================================================================

    /// Records that the employee is qualified to perform the service.
    /// Idempotent: assigning an existing edge is a no-op success. Both
    /// endpoints must exist.
    pub async fn assign(&self, service_id: Uuid, employee_id: Uuid) -> Result<(), CatalogError> {
        let mut state = self.state.write().await;

        if !state.services.contains_key(&service_id) || !state.employees.contains_key(&employee_id)
        {
            return Err(CatalogError::NotFound);
        }

        let inserted = state
            .by_service
            .entry(service_id)
            .or_default()
            .insert(employee_id);
        state
            .by_employee
            .entry(employee_id)
            .or_default()
            .insert(service_id);

        if inserted {
            info!("Employee {} assigned to service {}", employee_id, service_id);
        }
        Ok(())
    }

    /// Idempotent: unassigning a non-existent edge is a no-op success.
    pub async fn unassign(&self, service_id: Uuid, employee_id: Uuid) -> Result<(), CatalogError> {
        let mut state = self.state.write().await;

        if !state.services.contains_key(&service_id) || !state.employees.contains_key(&employee_id)
        {
            return Err(CatalogError::NotFound);
        }

        let removed = state
            .by_service
            .get_mut(&service_id)
            .map(|employees| employees.remove(&employee_id))
            .unwrap_or(false);
        if let Some(services) = state.by_employee.get_mut(&employee_id) {
            services.remove(&service_id);
        }

        if removed {
            info!(
                "Employee {} unassigned from service {}",
                employee_id, service_id
            );
        }
        Ok(())
    }

    pub async fn qualified_employees(&self, service_id: Uuid) -> Vec<Employee> {
        let state = self.state.read().await;
        let Some(ids) = state.by_service.get(&service_id) else {
            return Vec::new();
        };
        let mut employees: Vec<Employee> = ids
            .iter()
            .filter_map(|id| state.employees.get(id).cloned())
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        employees
    }

    pub async fn assigned_services(&self, employee_id: Uuid) -> Vec<Service> {
        let state = self.state.read().await;
        let Some(ids) = state.by_employee.get(&employee_id) else {
            return Vec::new();
        };
        let mut services: Vec<Service> = ids
            .iter()
            .filter_map(|id| state.services.get(id).cloned())
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        services
    }
}

#[async_trait]
impl CatalogReader for CatalogStore {
    async fn client_exists(&self, id: Uuid) -> bool {
        self.state.read().await.clients.contains_key(&id)
    }

    async fn employee_exists(&self, id: Uuid) -> bool {
        self.state.read().await.employees.contains_key(&id)
    }

    async fn service_exists(&self, id: Uuid) -> bool {
        self.state.read().await.services.contains_key(&id)
    }

    async fn employee(&self, id: Uuid) -> Option<Employee> {
        self.get_employee(id).await
    }

    async fn is_qualified(&self, employee_id: Uuid, service_id: Uuid) -> bool {
        self.state
            .read()
            .await
            .by_service
            .get(&service_id)
            .is_some_and(|employees| employees.contains(&employee_id))
    }

    async fn employees_for(&self, service_id: Uuid) -> HashSet<Uuid> {
        self.state
            .read()
            .await
            .by_service
            .get(&service_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn services_for(&self, employee_id: Uuid) -> HashSet<Uuid> {
        self.state
            .read()
            .await
            .by_employee
            .get(&employee_id)
            .cloned()
            .unwrap_or_default()
    }
}
