//! 会话令牌服务
//!
//! 登录成功后签发 HS256 令牌作为会话 Cookie 的值，门禁中间件校验签名、过期时间和角色。

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::ErrorCode;
use thiserror::Error;

/// 会话有效期 (秒), 与 Cookie 的 Max-Age 一致
pub const SESSION_TTL_SECS: i64 = 3600;

/// 会话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Admin,
    User,
}

impl SessionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRole::Admin => "admin",
            SessionRole::User => "user",
        }
    }
}

/// 存储在令牌中的 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 员工 ID
    pub sub: String,
    /// 显示名称
    pub name: String,
    /// 角色
    pub role: SessionRole,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
}

/// 当前会话身份 (由门禁中间件注入请求扩展)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// 员工 ID
    pub id: u32,
    /// 显示名称
    pub name: String,
    /// 角色
    pub role: SessionRole,
}

impl SessionIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == SessionRole::Admin
    }
}

/// 会话令牌错误
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("角色不匹配: 需要 {expected}")]
    WrongRole { expected: &'static str },

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::ExpiredToken => ErrorCode::TokenExpired,
            SessionError::InvalidToken(_) | SessionError::InvalidSignature => ErrorCode::TokenInvalid,
            SessionError::WrongRole { .. } => ErrorCode::PermissionDenied,
            SessionError::GenerationFailed(_) => ErrorCode::InternalError,
        }
    }
}

/// 会话令牌服务
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("algorithm", &"HS256")
            .field("ttl_secs", &SESSION_TTL_SECS)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    /// 使用签名密钥创建服务
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// 为员工签发会话令牌
    pub fn issue(&self, role: SessionRole, id: u32, name: &str) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: id.to_string(),
            name: name.to_string(),
            role,
            exp: (now + Duration::seconds(SESSION_TTL_SECS)).timestamp(),
            iat: now.timestamp(),
        };
        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| SessionError::GenerationFailed(e.to_string()))
    }

    /// 验证令牌并要求指定角色
    pub fn verify(&self, token: &str, expected: SessionRole) -> Result<SessionIdentity, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::ExpiredToken,
                ErrorKind::InvalidSignature => SessionError::InvalidSignature,
                _ => SessionError::InvalidToken(e.to_string()),
            })?;
        let claims = token_data.claims;

        if claims.role != expected {
            return Err(SessionError::WrongRole {
                expected: expected.as_str(),
            });
        }

        let id = claims
            .sub
            .parse()
            .map_err(|_| SessionError::InvalidToken(format!("malformed subject: {}", claims.sub)))?;

        Ok(SessionIdentity {
            id,
            name: claims.name,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionService {
        SessionService::new("unit-test-session-secret-0123456789")
    }

    #[test]
    fn test_issue_and_verify() {
        let sessions = service();
        let token = sessions.issue(SessionRole::User, 7, "Grace Hopper").unwrap();

        let identity = sessions.verify(&token, SessionRole::User).unwrap();
        assert_eq!(identity.id, 7);
        assert_eq!(identity.name, "Grace Hopper");
        assert!(!identity.is_admin());
    }

    #[test]
    fn test_role_must_match() {
        let sessions = service();
        let token = sessions.issue(SessionRole::User, 1, "u").unwrap();

        let err = sessions.verify(&token, SessionRole::Admin).unwrap_err();
        assert!(matches!(err, SessionError::WrongRole { expected: "admin" }));
        assert_eq!(err.code(), ErrorCode::PermissionDenied);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let sessions = service();
        let token = sessions.issue(SessionRole::Admin, 1, "Admin").unwrap();

        let sig_start = token.rfind('.').unwrap() + 1;
        let first = token.as_bytes()[sig_start];
        let mut tampered = token.clone();
        tampered.replace_range(
            sig_start..sig_start + 1,
            if first == b'A' { "B" } else { "A" },
        );

        assert!(sessions.verify(&tampered, SessionRole::Admin).is_err());
        assert!(sessions.verify("true", SessionRole::Admin).is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token = SessionService::new("another-secret-entirely-0123456789")
            .issue(SessionRole::Admin, 1, "Admin")
            .unwrap();

        let err = service().verify(&token, SessionRole::Admin).unwrap_err();
        assert!(matches!(err, SessionError::InvalidSignature));
        assert_eq!(err.code(), ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_expired_token_rejected() {
        let sessions = service();
        let now = Utc::now().timestamp();
        let token = sessions
            .encode_claims(&SessionClaims {
                sub: "1".into(),
                name: "Admin".into(),
                role: SessionRole::Admin,
                exp: now - 2 * SESSION_TTL_SECS,
                iat: now - 3 * SESSION_TTL_SECS,
            })
            .unwrap();

        let err = sessions.verify(&token, SessionRole::Admin).unwrap_err();
        assert!(matches!(err, SessionError::ExpiredToken));
        assert_eq!(err.code(), ErrorCode::TokenExpired);
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", service());
        assert!(!debug.contains("unit-test-session-secret"));
    }
}
