//! 工具模块
//!
//! - [`logger`] - 日志初始化

pub mod logger;

pub use logger::init_logger;
