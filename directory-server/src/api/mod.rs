//! 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工 JSON 接口 (无需认证)
//! - [`crate::pages`] - 页面路由 (门禁保护)

pub mod employees;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::pages;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        // Page routes - session gated
        .merge(pages::router(state))
        // Employee API - public
        .merge(employees::router())
        // Health API - public
        .merge(health::router())
}

/// Build the fully configured application
///
/// Used by both the HTTP server and in-process tests
pub fn create_router(state: ServerState) -> Router {
    build_router(&state)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
