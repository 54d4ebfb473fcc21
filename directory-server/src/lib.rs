//! Employee Directory Server
//!
//! # 架构概述
//!
//! 员工通讯录 Web 服务:
//!
//! - **数据存储** (`store`): 单个 JSON 文件, 整体读写
//! - **认证** (`auth`): 签名会话令牌 + Cookie, 管理员/用户两道门禁
//! - **页面** (`pages`): 服务端渲染的登录、注册、面板和通讯录页面
//! - **HTTP API** (`api`): `/api/employees` JSON 接口 (无需认证)
//!
//! # 模块结构
//!
//! ```text
//! directory-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── store/         # 员工数据存储
//! ├── auth/          # 会话令牌、Cookie、门禁
//! ├── pages/         # 页面路由和视图
//! ├── api/           # JSON 接口和路由组装
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod pages;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use api::create_router;
pub use auth::{SessionIdentity, SessionService};
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use store::{EmployeeStore, JsonFileStore, StoreError, StoreResult};
pub use utils::init_logger;

// Re-export unified error types from shared
pub use shared::{AppError, AppResult, ErrorCode};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

