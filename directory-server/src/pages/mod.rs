//! 页面路由
//!
//! | 路径 | 方法 | 门禁 |
//! |------|------|------|
//! | / | GET | 无 (跳转 /login) |
//! | /signup | GET, POST | 无 |
//! | /login | GET, POST | 无 |
//! | /logout | GET | 无 |
//! | /admin/login | GET, POST | 无 |
//! | /admin/logout | GET | 无 |
//! | /admin/dashboard | GET | 管理员 |
//! | /admin/add-employee | GET, POST | 管理员 |
//! | /admin/edit-employee/{id} | GET, POST | 管理员 |
//! | /admin/delete-employee/{id} | POST | 管理员 |
//! | /directory | GET | 用户或管理员 |

mod account;
mod admin;
mod directory;
pub mod forms;
pub mod views;

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};

use crate::auth::{require_admin, require_user};
use crate::core::ServerState;

/// Page router; gates need the state up front
pub fn router(state: &ServerState) -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/login") }))
        .route("/signup", get(account::signup_form).post(account::signup))
        .route("/login", get(account::login_form).post(account::login))
        .route("/logout", get(account::logout))
        .route(
            "/admin/login",
            get(account::admin_login_form).post(account::admin_login),
        )
        .route("/admin/logout", get(account::admin_logout));

    let admin_routes = Router::new()
        .route("/admin/dashboard", get(admin::dashboard))
        .route(
            "/admin/add-employee",
            get(admin::add_form).post(admin::add),
        )
        .route(
            "/admin/edit-employee/{id}",
            get(admin::edit_form).post(admin::edit),
        )
        .route("/admin/delete-employee/{id}", post(admin::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let user_routes = Router::new()
        .route("/directory", get(directory::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    public_routes.merge(admin_routes).merge(user_routes)
}
