//! Signup, login and logout pages

use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use shared::{AppError, ErrorCode};

use super::forms::{CredentialsForm, signup_profile};
use super::views;
use crate::auth::{SessionRole, authenticate_admin, authenticate_user, cookies};
use crate::core::ServerState;
use crate::security_log;

pub async fn signup_form() -> Html<String> {
    Html(views::signup_page(None))
}

/// Create an incomplete account; an admin has to finish it before login
pub async fn signup(State(state): State<ServerState>, Form(form): Form<CredentialsForm>) -> Response {
    let mut directory = state.store.load().await;

    if directory.find_by_email(&form.username).is_some() {
        let message = ErrorCode::EmployeeEmailExists.message();
        return Html(views::signup_page(Some(message))).into_response();
    }

    let today = chrono::Utc::now().date_naive();
    let saved = match directory.insert(signup_profile(form, today)) {
        Ok(employee) => {
            let id = employee.id;
            state.store.save(&directory).await.map(|()| id).map_err(|e| e.to_string())
        }
        Err(e) => Err(e.to_string()),
    };

    match saved {
        Ok(id) => {
            tracing::info!(id, "Account signed up");
            Redirect::to("/login").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create account");
            Html(views::signup_page(Some("Failed to create account"))).into_response()
        }
    }
}

pub async fn login_form() -> Html<String> {
    Html(views::login_page(None))
}

/// User login; admin accounts are sent to the dashboard with admin markers
pub async fn login(State(state): State<ServerState>, Form(form): Form<CredentialsForm>) -> Response {
    let directory = state.store.load().await;

    let employee = match authenticate_user(&directory, &form.username, &form.password) {
        Ok(e) => e,
        Err(e) => {
            security_log!(
                "WARN",
                "login_failed",
                username = form.username.clone(),
                code = e.code().code(),
                reason = format!("{}", e)
            );
            return Html(views::login_page(Some(&e.to_string()))).into_response();
        }
    };

    let (role, target) = if employee.is_admin() {
        (SessionRole::Admin, "/admin/dashboard")
    } else {
        (SessionRole::User, "/directory")
    };

    let token = match state.sessions.issue(role, employee.id, employee.name()) {
        Ok(t) => t,
        Err(e) => return AppError::with_message(e.code(), e.to_string()).into_response(),
    };
    let set_cookies = match role {
        SessionRole::Admin => cookies::admin_markers(&token, employee.name()),
        SessionRole::User => cookies::user_markers(&token, employee.name(), employee.id),
    };

    security_log!("INFO", "login_success", user_id = employee.id, role = role.as_str());
    (AppendHeaders(set_cookies), Redirect::to(target)).into_response()
}

pub async fn admin_login_form() -> Html<String> {
    Html(views::admin_login_page(None))
}

pub async fn admin_login(
    State(state): State<ServerState>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let directory = state.store.load().await;

    let admin = match authenticate_admin(&directory, &form.username, &form.password) {
        Ok(a) => a,
        Err(e) => {
            security_log!(
                "WARN",
                "admin_login_failed",
                username = form.username.clone(),
                code = e.code().code(),
                reason = format!("{}", e)
            );
            return Html(views::admin_login_page(Some(&e.to_string()))).into_response();
        }
    };

    let token = match state.sessions.issue(SessionRole::Admin, admin.id, admin.name()) {
        Ok(t) => t,
        Err(e) => return AppError::with_message(e.code(), e.to_string()).into_response(),
    };

    security_log!("INFO", "login_success", user_id = admin.id, role = "admin");
    (
        AppendHeaders(cookies::admin_markers(&token, admin.name())),
        Redirect::to("/admin/dashboard"),
    )
        .into_response()
}

/// Clears only the admin markers
pub async fn admin_logout() -> impl IntoResponse {
    (AppendHeaders(cookies::clear_admin()), Redirect::to("/admin/login"))
}

/// Clears every session marker
pub async fn logout() -> impl IntoResponse {
    (AppendHeaders(cookies::clear_all()), Redirect::to("/login"))
}
