use thiserror::Error;

use crate::store::StoreError;

/// 启动/运行期错误 (请求级错误见 [`shared::AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("目录数据错误: {0}")]
    Directory(#[from] shared::DirectoryError),

    #[error("数据存储错误: {0}")]
    Store(#[from] StoreError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
