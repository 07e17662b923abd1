use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const PATH_LOGIN: &str = "/auth/login";
pub const PATH_LOGOUT: &str = "/auth/logout";
pub const PATH_CHECK_ADMIN: &str = "/auth/check-admin";
pub const PATH_REGISTER: &str = "/auth/register";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 访问等级
///
/// 封闭枚举：服务端返回未知的角色字符串时反序列化直接失败，
/// 不会悄悄变成一个新的权限层级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已登录用户的身份信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// 注册时选择的身份，admin 需要邀请码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    #[default]
    User,
    Admin,
}

/// 非 2xx 响应的通用错误体 `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
