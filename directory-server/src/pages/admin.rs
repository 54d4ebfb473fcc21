//! Admin dashboard and employee maintenance pages

use axum::{
    Extension, Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use shared::ActionResponse;

use super::forms::EmployeeForm;
use super::views;
use crate::auth::SessionIdentity;
use crate::core::ServerState;

/// Number of cards on the dashboard
const RECENT_LIMIT: usize = 4;

fn to_dashboard() -> Response {
    Redirect::to("/admin/dashboard").into_response()
}

pub async fn dashboard(State(state): State<ServerState>) -> Html<String> {
    let directory = state.store.load().await;
    Html(views::dashboard_page(
        directory.len(),
        &directory.recent(RECENT_LIMIT),
    ))
}

pub async fn add_form() -> Html<String> {
    Html(views::employee_form_page(None, None))
}

pub async fn add(
    State(state): State<ServerState>,
    Extension(admin): Extension<SessionIdentity>,
    Form(form): Form<EmployeeForm>,
) -> Response {
    let mut directory = state.store.load().await;
    let saved = match directory.insert(form.into_new_profile()) {
        Ok(employee) => {
            let id = employee.id;
            state.store.save(&directory).await.map(|()| id).map_err(|e| e.to_string())
        }
        Err(e) => Err(e.to_string()),
    };

    match saved {
        Ok(id) => {
            tracing::info!(id, admin_id = admin.id, "Employee added");
            to_dashboard()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to add employee");
            Html(views::employee_form_page(None, Some("Failed to add employee"))).into_response()
        }
    }
}

pub async fn edit_form(State(state): State<ServerState>, Path(id): Path<String>) -> Response {
    let directory = state.store.load().await;
    match id.parse::<u32>().ok().and_then(|id| directory.find(id)) {
        Some(employee) => Html(views::employee_form_page(Some(employee), None)).into_response(),
        None => to_dashboard(),
    }
}

pub async fn edit(
    State(state): State<ServerState>,
    Extension(admin): Extension<SessionIdentity>,
    Path(id): Path<String>,
    Form(form): Form<EmployeeForm>,
) -> Response {
    let mut directory = state.store.load().await;
    let Some(current) = id.parse::<u32>().ok().and_then(|id| directory.find(id)) else {
        return to_dashboard();
    };
    let id = current.id;
    let profile = form.into_updated_profile(current);
    let Some(updated) = directory.replace(id, profile).cloned() else {
        return to_dashboard();
    };

    match state.store.save(&directory).await {
        Ok(()) => {
            tracing::info!(id, admin_id = admin.id, "Employee updated");
            to_dashboard()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update employee");
            Html(views::employee_form_page(
                Some(&updated),
                Some("Failed to update employee"),
            ))
            .into_response()
        }
    }
}

/// Remove a record; unknown ids still succeed
pub async fn delete(
    State(state): State<ServerState>,
    Extension(admin): Extension<SessionIdentity>,
    Path(id): Path<String>,
) -> Response {
    let mut directory = state.store.load().await;
    let removed = id.parse::<u32>().is_ok_and(|id| directory.remove(id));

    match state.store.save(&directory).await {
        Ok(()) => {
            tracing::info!(id = %id, removed, admin_id = admin.id, "Employee deleted");
            Json(ActionResponse::ok()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete employee");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActionResponse::failed("Failed to delete employee")),
            )
                .into_response()
        }
    }
}
