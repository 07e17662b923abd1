//! 认证服务网关
//!
//! 把 `skydeck_shared::protocol` 里的请求定义翻译成具体的 HTTP 调用，
//! 并把状态码和错误体统一映射成 [`AuthError`]。不持有任何会话状态。

use crate::config::ClientConfig;
use crate::error::{AuthError, AuthResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use skydeck_shared::protocol::{
    ApiRequest, CheckAdminRequest, LoginRequest, LoginResponse, LogoutRequest, RegisterRequest,
    RegisterResponse,
};
use skydeck_shared::{ErrorBody, Identity, Role};
use std::time::Duration;

const CONTENT_TYPE_JSON: &str = "application/json";

pub struct AuthGateway<'a, C: HttpClient> {
    client: &'a C,
    config: &'a ClientConfig,
}

impl<'a, C: HttpClient> AuthGateway<'a, C> {
    pub fn new(client: &'a C, config: &'a ClientConfig) -> Self {
        Self { client, config }
    }

    fn build<R: ApiRequest>(&self, request: &R) -> AuthResult<HttpRequest> {
        let url = self.config.endpoint(R::PATH);
        let mut req = HttpRequest::new(&url, R::METHOD).with_header("Accept", CONTENT_TYPE_JSON);

        if R::METHOD.has_body() {
            let body = match serde_json::to_value(request) {
                // 无字段的请求（如 logout）发送空对象
                Ok(serde_json::Value::Null) => serde_json::Value::Object(Default::default()),
                Ok(body) => body,
                Err(e) => {
                    return Err(AuthError::InvalidResponse(format!(
                        "unserializable request: {}",
                        e
                    )));
                }
            };
            req = req
                .with_header("Content-Type", CONTENT_TYPE_JSON)
                .with_body(body);
        }
        Ok(req)
    }

    /// 发送请求并拿到原始响应，非 2xx 转成错误
    async fn exchange<R: ApiRequest>(
        &self,
        request: &R,
        timeout: Option<Duration>,
    ) -> AuthResult<HttpResponse> {
        let mut req = self.build(request)?;
        if let Some(t) = timeout {
            req = req.with_timeout(t);
        }

        let resp = self.client.send(req).await?;
        if !resp.is_success() {
            return Err(rejection(&resp));
        }
        Ok(resp)
    }

    async fn call<R: ApiRequest>(
        &self,
        request: &R,
        timeout: Option<Duration>,
    ) -> AuthResult<R::Response> {
        let resp = self.exchange(request, timeout).await?;
        Ok(resp.json::<R::Response>()?)
    }

    /// `POST /auth/login`
    ///
    /// 空用户名/密码在本地拦截；角色为 guest 的登录结果视为非法响应。
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<LoginResponse> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self.call(&request, Some(self.config.request_timeout)).await?;

        if resp.role == Role::Guest {
            return Err(AuthError::InvalidResponse(
                "login succeeded with guest role".to_string(),
            ));
        }
        Ok(resp)
    }

    /// `POST /auth/logout`，响应体内容不重要
    pub async fn logout(&self) -> AuthResult<()> {
        self.exchange(&LogoutRequest, Some(self.config.request_timeout))
            .await
            .map(|_| ())
    }

    /// `GET /auth/check-admin`
    pub async fn check_admin(&self) -> AuthResult<bool> {
        let resp = self
            .call(&CheckAdminRequest, Some(self.config.request_timeout))
            .await?;
        Ok(resp.is_admin)
    }

    /// `POST /auth/register`
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        identity: Identity,
        invite_code: Option<&str>,
    ) -> AuthResult<RegisterResponse> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let invite_code = invite_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        if identity == Identity::Admin && invite_code.is_none() {
            return Err(AuthError::MissingInviteCode);
        }

        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            identity,
            invite_code,
        };
        self.call(&request, Some(self.config.request_timeout)).await
    }
}

/// 把非 2xx 响应转成错误，优先使用服务端 `{"error": ...}` 里的消息
fn rejection(resp: &HttpResponse) -> AuthError {
    let message = match resp.json::<ErrorBody>() {
        Ok(body) => body.error,
        Err(_) if !resp.body.trim().is_empty() => resp.body.trim().to_string(),
        Err(_) => format!("HTTP {}", resp.status),
    };
    AuthError::from_status(resp.status, message)
}
