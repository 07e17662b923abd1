use crate::{Identity, PATH_CHECK_ADMIN, PATH_LOGIN, PATH_LOGOUT, PATH_REGISTER, Role};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET 请求不携带请求体
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

/// Log in with username + password. The server answers with a session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = PATH_LOGIN;
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Drop the server-side session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiRequest for LogoutRequest {
    type Response = LogoutResponse;
    const PATH: &'static str = PATH_LOGOUT;
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Ask the server whether the cookie session belongs to an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAdminRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAdminResponse {
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

impl ApiRequest for CheckAdminRequest {
    type Response = CheckAdminResponse;
    const PATH: &'static str = PATH_CHECK_ADMIN;
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Create an account. Admin accounts need an invite code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub identity: Identity,
    #[serde(rename = "inviteCode", default, skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub admin_id: Option<i64>,
}

impl RegisterResponse {
    /// 新账号的 id，无论是普通用户还是管理员
    pub fn account_id(&self) -> Option<i64> {
        self.user_id.or(self.admin_id)
    }
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;
    const PATH: &'static str = PATH_REGISTER;
    const METHOD: HttpMethod = HttpMethod::Post;
}
