use std::sync::Arc;

use shared::{Directory, EmployeeProfile};

use crate::auth::SessionService;
use crate::core::{Config, Result};
use crate::store::{EmployeeStore, JsonFileStore};

/// 服务器状态 - 持有所有服务的引用
///
/// ServerState 是 Clone 的，每个请求拿到一份浅拷贝 (内部均为 Arc)。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 服务器配置 |
/// | store | 员工数据存储 |
/// | sessions | 会话令牌签发与校验 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 员工数据存储
    pub store: Arc<dyn EmployeeStore>,
    /// 会话令牌服务
    pub sessions: Arc<SessionService>,
}

impl ServerState {
    /// 使用给定存储构造状态
    pub fn with_store(config: Config, store: Arc<dyn EmployeeStore>) -> Self {
        let sessions = Arc::new(SessionService::new(&config.session_secret));
        Self {
            config,
            store,
            sessions,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 打开 JSON 数据文件
    /// 2. 数据为空且配置了初始管理员时写入管理员账号
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store: Arc<dyn EmployeeStore> = Arc::new(JsonFileStore::new(&config.data_file));
        let state = Self::with_store(config.clone(), store);

        if let Some((email, password)) = &config.bootstrap_admin {
            state.bootstrap_admin(email, password).await?;
        }

        tracing::info!(
            data_file = %config.data_file.display(),
            environment = %config.environment,
            "Server state initialized"
        );
        Ok(state)
    }

    /// 数据为空时创建初始管理员
    ///
    /// 返回是否创建了新记录
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<bool> {
        let mut directory: Directory = self.store.load().await;
        if !directory.is_empty() {
            return Ok(false);
        }

        let id = directory
            .insert(EmployeeProfile {
                name: Some("Admin".into()),
                email: Some(email.to_string()),
                password: Some(password.to_string()),
                is_admin: Some(true),
                registration_completed: Some(true),
                ..Default::default()
            })?
            .id;
        self.store.save(&directory).await?;

        tracing::info!(id, email, "Bootstrap admin created");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_admin_on_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_data_file(dir.path().join("db.json"));
        config.bootstrap_admin = Some(("root@company.com".into(), "secret".into()));

        let state = ServerState::initialize(&config).await.unwrap();
        let directory = state.store.load().await;

        assert_eq!(directory.len(), 1);
        let admin = directory.find_by_email("root@company.com").unwrap();
        assert_eq!(admin.id, 1);
        assert!(admin.is_admin());
        assert!(admin.registration_completed());
        assert_eq!(admin.name(), "Admin");
    }

    #[tokio::test]
    async fn test_bootstrap_admin_skipped_when_store_has_records() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_data_file(dir.path().join("db.json"));
        let state = ServerState::initialize(&config).await.unwrap();

        assert!(state.bootstrap_admin("a@company.com", "pw").await.unwrap());
        assert!(!state.bootstrap_admin("b@company.com", "pw").await.unwrap());
        assert_eq!(state.store.load().await.len(), 1);
    }
}
