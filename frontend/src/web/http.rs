//! HTTP 请求封装模块
//!
//! 基于 `gloo-net` 的 [`HttpClient`] 实现。所有请求都带 `credentials: include`，
//! 认证服务靠 cookie 识别会话。

use super::timer::with_timeout;
use gloo_net::http::{Request, RequestBuilder};
use skydeck::request::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use web_sys::RequestCredentials;

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn builder(req: &HttpRequest) -> RequestBuilder {
        let builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };

        req.headers
            .iter()
            .fold(builder.credentials(RequestCredentials::Include), |b, (k, v)| {
                b.header(k, v)
            })
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let builder = Self::builder(&req);
        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::Network(format!("请求构建失败: {}", e)))?;

        let exchange = async move {
            let resp = request
                .send()
                .await
                .map_err(|e| HttpError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| HttpError::Decode(e.to_string()))?;
            Ok::<_, HttpError>(HttpResponse { status, body })
        };

        match req.timeout {
            Some(limit) => with_timeout(exchange, limit)
                .await
                .unwrap_or(Err(HttpError::Timeout(limit))),
            None => exchange.await,
        }
    }
}
