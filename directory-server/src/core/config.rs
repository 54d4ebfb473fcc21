use std::path::PathBuf;

use crate::core::{Result, ServerError};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATA_FILE | db.json | 员工数据文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SESSION_SECRET | (开发环境自动生成) | 会话令牌签名密钥 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志文件目录 (按天滚动) |
/// | BOOTSTRAP_ADMIN_EMAIL | - | 空数据文件时创建的管理员邮箱 |
/// | BOOTSTRAP_ADMIN_PASSWORD | - | 空数据文件时创建的管理员密码 |
///
/// # 示例
///
/// ```ignore
/// DATA_FILE=/data/db.json HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP 服务端口
    pub http_port: u16,
    /// 员工数据文件路径
    pub data_file: PathBuf,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 会话令牌签名密钥
    pub session_secret: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 初始管理员 (email, password)
    pub bootstrap_admin: Option<(String, String)>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let bootstrap_admin = match (
            non_empty_var("BOOTSTRAP_ADMIN_EMAIL"),
            non_empty_var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        };

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_file: std::env::var("DATA_FILE")
                .unwrap_or_else(|_| "db.json".into())
                .into(),
            session_secret: Self::require_secret("SESSION_SECRET", &environment)?,
            environment,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: non_empty_var("LOG_DIR"),
            bootstrap_admin,
        })
    }

    /// 密钥类环境变量: 非开发环境必须设置且非空
    fn require_secret(name: &str, environment: &str) -> Result<String> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ServerError::Config(format!(
                        "{name} must be set in {environment} environment"
                    )));
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ServerError::Config(format!(
                "{name} must not be empty in {environment} environment"
            )));
        }
        Ok(val)
    }

    /// 使用自定义数据文件构造配置 (测试使用)
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            http_port: 0,
            data_file: data_file.into(),
            environment: "development".into(),
            session_secret: "test-session-secret-with-enough-length".into(),
            log_level: "info".into(),
            log_dir: None,
            bootstrap_admin: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_falls_back_in_development() {
        let secret =
            Config::require_secret("DIRECTORY_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(secret, "dev-DIRECTORY_TEST_UNSET_SECRET-not-for-production");
    }

    #[test]
    fn test_require_secret_rejects_missing_in_production() {
        let err = Config::require_secret("DIRECTORY_TEST_UNSET_SECRET", "production").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_with_data_file() {
        let config = Config::with_data_file("/tmp/employees.json");
        assert_eq!(config.data_file, PathBuf::from("/tmp/employees.json"));
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(config.bootstrap_admin.is_none());
    }
}
