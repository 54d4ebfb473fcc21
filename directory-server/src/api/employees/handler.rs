//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::{ActionResponse, AppError, AppResult, Directory, Employee, ErrorCode};

use super::EmployeePayload;
use crate::core::ServerState;

/// Non-numeric ids can never match a record
fn parse_id(id: &str) -> AppResult<u32> {
    id.parse()
        .map_err(|_| AppError::new(ErrorCode::EmployeeNotFound))
}

async fn persist(state: &ServerState, directory: &Directory, failure: &str) -> AppResult<()> {
    state.store.save(directory).await.map_err(|e| {
        let mut err = AppError::from(e);
        err.message = failure.to_string();
        err
    })
}

/// List all employees, including entries kept without a usable id
pub async fn list(State(state): State<ServerState>) -> Response {
    let directory = state.store.load().await;
    Json(directory.records()).into_response()
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let id = parse_id(&id)?;
    let directory = state.store.load().await;
    let employee = directory
        .find(id)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
    Ok(Json(employee))
}

/// Create a new employee under the next id
///
/// An `id` in the payload is ignored.
pub async fn create(
    State(state): State<ServerState>,
    EmployeePayload(profile): EmployeePayload,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let mut directory = state.store.load().await;
    let employee = directory
        .insert(profile)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create employee");
            AppError::with_message(ErrorCode::DatabaseError, "Failed to create employee")
        })?
        .clone();

    persist(&state, &directory, "Failed to create employee").await?;

    tracing::info!(id = employee.id, "Employee created via API");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Replace an employee wholesale
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    EmployeePayload(profile): EmployeePayload,
) -> AppResult<Json<Employee>> {
    let id = parse_id(&id)?;
    let mut directory = state.store.load().await;
    let employee = directory
        .replace(id, profile)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    persist(&state, &directory, "Failed to update employee").await?;

    tracing::info!(id, "Employee replaced via API");
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ActionResponse>> {
    let id = parse_id(&id)?;
    let mut directory = state.store.load().await;
    if !directory.remove(id) {
        return Err(AppError::new(ErrorCode::EmployeeNotFound));
    }

    persist(&state, &directory, "Failed to delete employee").await?;

    tracing::info!(id, "Employee deleted via API");
    Ok(Json(ActionResponse::ok_with_message("Employee deleted")))
}
