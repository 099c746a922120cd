use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use uuid::Uuid;

use catalog_cell::models::{
    CatalogError, CreateClientRequest, CreateEmployeeRequest, CreateServiceRequest,
};
use catalog_cell::store::{AppointmentIndex, CatalogReader, CatalogStore};

/// Stand-in for the scheduling store's reference index.
struct StubIndex {
    referenced: bool,
}

#[async_trait]
impl AppointmentIndex for StubIndex {
    async fn references_client(&self, _client_id: Uuid) -> bool {
        self.referenced
    }
    async fn references_employee(&self, _employee_id: Uuid) -> bool {
        self.referenced
    }
    async fn references_service(&self, _service_id: Uuid) -> bool {
        self.referenced
    }
}

fn store_with_references(referenced: bool) -> CatalogStore {
    CatalogStore::new(Arc::new(StubIndex { referenced }))
}

fn client_request(email: &str) -> CreateClientRequest {
    CreateClientRequest {
        name: "Ana Lima".to_string(),
        email: email.to_string(),
        address: "12 Rua das Flores".to_string(),
        credential: "opaque-hash".to_string(),
    }
}

fn employee_request(email: &str) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        name: "Bruno Costa".to_string(),
        email: email.to_string(),
        credential: "opaque-hash".to_string(),
    }
}

fn service_request(name: &str) -> CreateServiceRequest {
    CreateServiceRequest {
        name: name.to_string(),
        description: "A service".to_string(),
    }
}

#[tokio::test]
async fn duplicate_client_email_is_rejected_case_insensitively() {
    let store = store_with_references(false);

    store.create_client(client_request("ana@example.com")).await.unwrap();
    let err = store
        .create_client(client_request("  ANA@Example.COM "))
        .await
        .unwrap_err();

    assert_matches!(err, CatalogError::DuplicateEmail(_));
}

#[tokio::test]
async fn duplicate_employee_email_is_rejected() {
    let store = store_with_references(false);

    store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap();
    let err = store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap_err();

    assert_matches!(err, CatalogError::DuplicateEmail(_));
}

#[tokio::test]
async fn duplicate_service_name_is_rejected_case_insensitively() {
    let store = store_with_references(false);

    store.create_service(service_request("Haircut")).await.unwrap();
    let err = store
        .create_service(service_request("HAIRCUT"))
        .await
        .unwrap_err();

    assert_matches!(err, CatalogError::DuplicateServiceName(_));
}

#[tokio::test]
async fn assign_is_idempotent() {
    let store = store_with_references(false);
    let service = store.create_service(service_request("Haircut")).await.unwrap();
    let employee = store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap();

    store.assign(service.id, employee.id).await.unwrap();
    store.assign(service.id, employee.id).await.unwrap();

    assert!(store.is_qualified(employee.id, service.id).await);
    assert_eq!(store.employees_for(service.id).await.len(), 1);
    assert_eq!(store.services_for(employee.id).await.len(), 1);
}

#[tokio::test]
async fn unassign_missing_edge_is_a_noop_success() {
    let store = store_with_references(false);
    let service = store.create_service(service_request("Haircut")).await.unwrap();
    let employee = store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap();

    // No edge exists; still a success.
    store.unassign(service.id, employee.id).await.unwrap();
    assert!(!store.is_qualified(employee.id, service.id).await);
}

#[tokio::test]
async fn assign_requires_both_endpoints() {
    let store = store_with_references(false);
    let service = store.create_service(service_request("Haircut")).await.unwrap();

    let err = store.assign(service.id, Uuid::new_v4()).await.unwrap_err();
    assert_matches!(err, CatalogError::NotFound);

    let employee = store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap();
    let err = store.assign(Uuid::new_v4(), employee.id).await.unwrap_err();
    assert_matches!(err, CatalogError::NotFound);
}

#[tokio::test]
async fn unassign_severs_both_directions() {
    let store = store_with_references(false);
    let service = store.create_service(service_request("Haircut")).await.unwrap();
    let employee = store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap();

    store.assign(service.id, employee.id).await.unwrap();
    store.unassign(service.id, employee.id).await.unwrap();

    assert!(store.employees_for(service.id).await.is_empty());
    assert!(store.services_for(employee.id).await.is_empty());
}

#[tokio::test]
async fn deleting_referenced_records_is_refused() {
    let store = store_with_references(true);
    let client = store.create_client(client_request("ana@example.com")).await.unwrap();
    let employee = store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap();
    let service = store.create_service(service_request("Haircut")).await.unwrap();

    assert_matches!(
        store.delete_client(client.id).await.unwrap_err(),
        CatalogError::ReferencedByAppointment { entity: "Client" }
    );
    assert_matches!(
        store.delete_employee(employee.id).await.unwrap_err(),
        CatalogError::ReferencedByAppointment { entity: "Employee" }
    );
    assert_matches!(
        store.delete_service(service.id).await.unwrap_err(),
        CatalogError::ReferencedByAppointment { entity: "Service" }
    );

    // Nothing was removed.
    assert!(store.client(client.id).await.is_some());
    assert!(store.get_employee(employee.id).await.is_some());
    assert!(store.service(service.id).await.is_some());
}

#[tokio::test]
async fn deleting_unreferenced_records_succeeds() {
    let store = store_with_references(false);
    let client = store.create_client(client_request("ana@example.com")).await.unwrap();

    store.delete_client(client.id).await.unwrap();
    assert!(store.client(client.id).await.is_none());

    assert_matches!(
        store.delete_client(client.id).await.unwrap_err(),
        CatalogError::NotFound
    );
}

#[tokio::test]
async fn deleting_an_employee_removes_its_capability_edges() {
    let store = store_with_references(false);
    let service = store.create_service(service_request("Haircut")).await.unwrap();
    let employee = store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap();
    store.assign(service.id, employee.id).await.unwrap();

    store.delete_employee(employee.id).await.unwrap();

    assert!(store.employees_for(service.id).await.is_empty());
}

#[tokio::test]
async fn deleting_a_service_removes_its_capability_edges() {
    let store = store_with_references(false);
    let service = store.create_service(service_request("Haircut")).await.unwrap();
    let employee = store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap();
    store.assign(service.id, employee.id).await.unwrap();

    store.delete_service(service.id).await.unwrap();

    assert!(store.services_for(employee.id).await.is_empty());
}

#[tokio::test]
async fn qualified_employees_returns_full_records() {
    let store = store_with_references(false);
    let service = store.create_service(service_request("Haircut")).await.unwrap();
    let employee = store
        .create_employee(employee_request("bruno@example.com"))
        .await
        .unwrap();
    store.assign(service.id, employee.id).await.unwrap();

    let employees = store.qualified_employees(service.id).await;
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, employee.id);

    let services = store.assigned_services(employee.id).await;
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].id, service.id);
}
