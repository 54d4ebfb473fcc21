//! 凭证校验
//!
//! 密码按原样存储并做精确字符串比较, 与现有数据文件保持兼容。

use shared::{Directory, Employee, ErrorCode};
use thiserror::Error;

/// 登录失败原因
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please contact a system administrator to finish the signup process")]
    RegistrationIncomplete,

    #[error("Invalid credentials or not an admin user")]
    NotAdmin,
}

impl LoginError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LoginError::InvalidCredentials => ErrorCode::InvalidCredentials,
            LoginError::RegistrationIncomplete => ErrorCode::RegistrationIncomplete,
            LoginError::NotAdmin => ErrorCode::AdminRequired,
        }
    }
}

fn password_matches(employee: &Employee, password: &str) -> bool {
    employee.password() == Some(password)
}

/// 用户登录: 邮箱 + 密码, 且注册已完成
///
/// 密码错误优先于注册未完成。
pub fn authenticate_user<'a>(
    directory: &'a Directory,
    email: &str,
    password: &str,
) -> Result<&'a Employee, LoginError> {
    let employee = directory
        .find_by_email(email)
        .filter(|e| password_matches(e, password))
        .ok_or(LoginError::InvalidCredentials)?;

    if !employee.registration_completed() {
        return Err(LoginError::RegistrationIncomplete);
    }
    Ok(employee)
}

/// 管理员登录: 第一个邮箱匹配且 `isAdmin == true` 的记录
///
/// 不检查注册状态。
pub fn authenticate_admin<'a>(
    directory: &'a Directory,
    email: &str,
    password: &str,
) -> Result<&'a Employee, LoginError> {
    directory
        .employees
        .iter()
        .find(|e| e.email() == Some(email) && e.is_admin())
        .filter(|e| password_matches(e, password))
        .ok_or(LoginError::NotAdmin)
}
