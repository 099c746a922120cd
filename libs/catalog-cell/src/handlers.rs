// libs/catalog-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    CatalogError, CreateClientRequest, CreateEmployeeRequest, CreateServiceRequest,
};
use crate::store::CatalogStore;

fn catalog_error(e: CatalogError) -> AppError {
    match e {
        CatalogError::NotFound => AppError::NotFound("Record not found".to_string()),
        CatalogError::DuplicateEmail(email) => {
            AppError::Conflict(format!("Email address already registered: {}", email))
        }
        CatalogError::DuplicateServiceName(name) => {
            AppError::Conflict(format!("Service name already exists: {}", name))
        }
        CatalogError::ReferencedByAppointment { entity } => AppError::Conflict(format!(
            "{} is referenced by an existing appointment",
            entity
        )),
    }
}

// ==============================================================================
// CLIENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_client(
    State(store): State<Arc<CatalogStore>>,
    Json(request): Json<CreateClientRequest>,
) -> Result<Json<Value>, AppError> {
    let client = store.create_client(request).await.map_err(catalog_error)?;
    Ok(Json(json!({ "success": true, "client": client })))
}

#[axum::debug_handler]
pub async fn get_client(
    State(store): State<Arc<CatalogStore>>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let client = store
        .client(client_id)
        .await
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;
    Ok(Json(json!({ "client": client })))
}

#[axum::debug_handler]
pub async fn list_clients(
    State(store): State<Arc<CatalogStore>>,
) -> Result<Json<Value>, AppError> {
    let clients = store.list_clients().await;
    Ok(Json(json!({ "clients": clients })))
}

#[axum::debug_handler]
pub async fn delete_client(
    State(store): State<Arc<CatalogStore>>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    store.delete_client(client_id).await.map_err(catalog_error)?;
    Ok(Json(json!({ "success": true })))
}

// ==============================================================================
// EMPLOYEE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_employee(
    State(store): State<Arc<CatalogStore>>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<Json<Value>, AppError> {
    let employee = store.create_employee(request).await.map_err(catalog_error)?;
    Ok(Json(json!({ "success": true, "employee": employee })))
}

#[axum::debug_handler]
pub async fn get_employee(
    State(store): State<Arc<CatalogStore>>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let employee = store
        .get_employee(employee_id)
        .await
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    Ok(Json(json!({ "employee": employee })))
}

#[axum::debug_handler]
pub async fn list_employees(
    State(store): State<Arc<CatalogStore>>,
) -> Result<Json<Value>, AppError> {
    let employees = store.list_employees().await;
    Ok(Json(json!({ "employees": employees })))
}

#[axum::debug_handler]
pub async fn delete_employee(
    State(store): State<Arc<CatalogStore>>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    store
        .delete_employee(employee_id)
        .await
        .map_err(catalog_error)?;
    Ok(Json(json!({ "success": true })))
}

/// Services the employee is qualified to perform.
#[axum::debug_handler]
pub async fn get_employee_services(
    State(store): State<Arc<CatalogStore>>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if store.get_employee(employee_id).await.is_none() {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }
    let services = store.assigned_services(employee_id).await;
    Ok(Json(json!({ "services": services })))
}

// ==============================================================================
// SERVICE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_service(
    State(store): State<Arc<CatalogStore>>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<Json<Value>, AppError> {
    let service = store.create_service(request).await.map_err(catalog_error)?;
    Ok(Json(json!({ "success": true, "service": service })))
}

#[axum::debug_handler]
pub async fn get_service(
    State(store): State<Arc<CatalogStore>>,
    Path(service_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = store
        .service(service_id)
        .await
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;
    Ok(Json(json!({ "service": service })))
}

#[axum::debug_handler]
pub async fn list_services(
    State(store): State<Arc<CatalogStore>>,
) -> Result<Json<Value>, AppError> {
    let services = store.list_services().await;
    Ok(Json(json!({ "services": services })))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(store): State<Arc<CatalogStore>>,
    Path(service_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    store
        .delete_service(service_id)
        .await
        .map_err(catalog_error)?;
    Ok(Json(json!({ "success": true })))
}

// ==============================================================================
// CAPABILITY GRAPH HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn assign_employee(
    State(store): State<Arc<CatalogStore>>,
    Path((service_id, employee_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    store
        .assign(service_id, employee_id)
        .await
        .map_err(catalog_error)?;
    Ok(Json(json!({ "success": true })))
}

#[axum::debug_handler]
pub async fn unassign_employee(
    State(store): State<Arc<CatalogStore>>,
    Path((service_id, employee_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    store
        .unassign(service_id, employee_id)
        .await
        .map_err(catalog_error)?;
    Ok(Json(json!({ "success": true })))
}

/// Employees qualified for the service, regardless of availability.
#[axum::debug_handler]
pub async fn get_service_employees(
    State(store): State<Arc<CatalogStore>>,
    Path(service_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if store.service(service_id).await.is_none() {
        return Err(AppError::NotFound("Service not found".to_string()));
    }
    let employees = store.qualified_employees(service_id).await;
    Ok(Json(json!({ "employees": employees })))
}
