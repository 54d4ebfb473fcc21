//! 认证模块
//!
//! 提供会话令牌、Cookie、凭证校验和门禁中间件:
//! - [`SessionService`] - 会话令牌服务
//! - [`SessionIdentity`] - 当前会话身份
//! - [`authenticate_user`] / [`authenticate_admin`] - 登录凭证校验
//! - [`require_admin`] / [`require_user`] - 门禁中间件

pub mod cookies;
pub mod credentials;
pub mod middleware;
pub mod session;

pub use credentials::{LoginError, authenticate_admin, authenticate_user};
pub use middleware::{require_admin, require_user};
pub use session::{
    SESSION_TTL_SECS, SessionClaims, SessionError, SessionIdentity, SessionRole, SessionService,
};
