//! 会话 Cookie
//!
//! | Cookie | 值 |
//! |--------|----|
//! | isAdmin | 管理员会话令牌 |
//! | adminName | 管理员显示名称 |
//! | isUser | 普通用户会话令牌 |
//! | userName | 用户显示名称 |
//! | userId | 用户员工 ID |
//!
//! 显示名称做百分号编码后写入。

use http::HeaderMap;
use http::header::{HeaderName, SET_COOKIE};

use crate::auth::SESSION_TTL_SECS;

pub const ADMIN_TOKEN_COOKIE: &str = "isAdmin";
pub const ADMIN_NAME_COOKIE: &str = "adminName";
pub const USER_TOKEN_COOKIE: &str = "isUser";
pub const USER_NAME_COOKIE: &str = "userName";
pub const USER_ID_COOKIE: &str = "userId";

const ADMIN_COOKIES: [&str; 2] = [ADMIN_TOKEN_COOKIE, ADMIN_NAME_COOKIE];
const ALL_COOKIES: [&str; 5] = [
    ADMIN_TOKEN_COOKIE,
    ADMIN_NAME_COOKIE,
    USER_TOKEN_COOKIE,
    USER_NAME_COOKIE,
    USER_ID_COOKIE,
];

/// `Set-Cookie` 头列表, 用于 `axum::response::AppendHeaders`
pub type SetCookies = Vec<(HeaderName, String)>;

/// 读取并解码请求中的 Cookie
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for cookie in headers.get_all(http::header::COOKIE) {
        let Ok(s) = cookie.to_str() else { continue };
        for part in s.split(';') {
            let p = part.trim();
            if let Some((k, v)) = p.split_once('=')
                && k == name
            {
                return Some(
                    urlencoding::decode(v)
                        .map(|d| d.into_owned())
                        .unwrap_or_else(|_| v.to_string()),
                );
            }
        }
    }
    None
}

fn set_cookie(name: &str, value: &str) -> (HeaderName, String) {
    (
        SET_COOKIE,
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            name,
            urlencoding::encode(value),
            SESSION_TTL_SECS
        ),
    )
}

fn clear_cookie(name: &str) -> (HeaderName, String) {
    (
        SET_COOKIE,
        format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
    )
}

/// 管理员登录 Cookie
pub fn admin_markers(token: &str, name: &str) -> SetCookies {
    vec![
        set_cookie(ADMIN_TOKEN_COOKIE, token),
        set_cookie(ADMIN_NAME_COOKIE, name),
    ]
}

/// 普通用户登录 Cookie
pub fn user_markers(token: &str, name: &str, id: u32) -> SetCookies {
    vec![
        set_cookie(USER_TOKEN_COOKIE, token),
        set_cookie(USER_NAME_COOKIE, name),
        set_cookie(USER_ID_COOKIE, &id.to_string()),
    ]
}

/// 清除全部五个会话 Cookie
pub fn clear_all() -> SetCookies {
    ALL_COOKIES.iter().map(|name| clear_cookie(name)).collect()
}

/// 只清除管理员 Cookie
pub fn clear_admin() -> SetCookies {
    ADMIN_COOKIES.iter().map(|name| clear_cookie(name)).collect()
}
