//! 门禁中间件
//!
//! 页面路由的两个独立门禁, 通过 `middleware::from_fn_with_state` 挂载:
//!
//! | 门禁 | 通过条件 | 失败跳转 |
//! |------|----------|----------|
//! | [`require_admin`] | 有效的管理员令牌 | `/admin/login` |
//! | [`require_user`] | 有效的用户令牌或管理员令牌 | `/login` |
//!
//! 校验通过后将 [`SessionIdentity`] 注入请求扩展。
//! 被篡改或过期的令牌视为未登录。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::cookies::{ADMIN_TOKEN_COOKIE, USER_TOKEN_COOKIE, parse_cookie};
use crate::auth::{SessionIdentity, SessionRole, SessionService};
use crate::core::ServerState;
use crate::security_log;

fn verify_cookie(
    sessions: &SessionService,
    req: &Request,
    cookie: &str,
    role: SessionRole,
) -> Option<SessionIdentity> {
    let token = parse_cookie(req.headers(), cookie)?;
    match sessions.verify(&token, role) {
        Ok(identity) => Some(identity),
        Err(e) => {
            security_log!(
                "WARN",
                "session_rejected",
                cookie = cookie,
                code = e.code().code(),
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            None
        }
    }
}

/// 管理员门禁
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    match verify_cookie(&state.sessions, &req, ADMIN_TOKEN_COOKIE, SessionRole::Admin) {
        Some(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        None => {
            security_log!("WARN", "admin_required", uri = format!("{:?}", req.uri()));
            Redirect::to("/admin/login").into_response()
        }
    }
}

/// 用户门禁 (管理员同样放行)
pub async fn require_user(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = verify_cookie(&state.sessions, &req, USER_TOKEN_COOKIE, SessionRole::User)
        .or_else(|| {
            verify_cookie(&state.sessions, &req, ADMIN_TOKEN_COOKIE, SessionRole::Admin)
        });

    match identity {
        Some(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            Redirect::to("/login").into_response()
        }
    }
}
