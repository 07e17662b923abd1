use crate::request::HttpError;

// =========================================================
// 认证错误
// =========================================================

/// 登录/注册等需要反馈给调用方的失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// 本地校验：用户名或密码为空，未发出请求
    #[error("username and password required")]
    MissingCredentials,
    /// 管理员注册缺少邀请码，未发出请求
    #[error("invite code required for admin registration")]
    MissingInviteCode,
    /// 401: 用户名或密码错误
    #[error("invalid credentials")]
    InvalidCredentials,
    /// 403: 账号被封禁或无权访问
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// 其他非 2xx 响应
    #[error("rejected by auth service ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// 2xx 但响应体不符合约定
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
}

impl AuthError {
    /// 机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::MissingInviteCode => "MISSING_INVITE_CODE",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Forbidden(_) => "FORBIDDEN",
            AuthError::Rejected { .. } => "REJECTED",
            AuthError::InvalidResponse(_) => "INVALID_RESPONSE",
            AuthError::Network(_) => "NETWORK_ERROR",
            AuthError::Timeout => "TIMEOUT",
        }
    }

    /// 请求没有得到服务端的明确答复
    pub fn is_transport(&self) -> bool {
        matches!(self, AuthError::Network(_) | AuthError::Timeout)
    }

    /// 按 HTTP 状态码和服务端错误消息归类
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => AuthError::InvalidCredentials,
            403 => AuthError::Forbidden(message),
            _ => AuthError::Rejected { status, message },
        }
    }
}

impl From<HttpError> for AuthError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Network(msg) => AuthError::Network(msg),
            HttpError::Timeout(_) => AuthError::Timeout,
            HttpError::Decode(msg) => AuthError::InvalidResponse(msg),
        }
    }
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn status_mapping() {
        assert_eq!(AuthError::from_status(401, "Invalid credentials"), AuthError::InvalidCredentials);
        assert_eq!(
            AuthError::from_status(403, "Account banned: spam"),
            AuthError::Forbidden("Account banned: spam".into())
        );
        assert_eq!(
            AuthError::from_status(500, "boom"),
            AuthError::Rejected { status: 500, message: "boom".into() }
        );
    }

    #[test]
    fn transport_errors_convert() {
        let timeout: AuthError = HttpError::Timeout(Duration::from_secs(10)).into();
        assert_eq!(timeout, AuthError::Timeout);
        assert!(timeout.is_transport());

        let decode: AuthError = HttpError::Decode("eof".into()).into();
        assert_eq!(decode.error_code(), "INVALID_RESPONSE");
        assert!(!decode.is_transport());
    }

    #[test]
    fn display_includes_server_message() {
        let err = AuthError::Rejected { status: 400, message: "Username and password required".into() };
        assert_eq!(
            err.to_string(),
            "rejected by auth service (400): Username and password required"
        );
    }
}
