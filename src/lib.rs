//! SkyDeck 客户端核心
//!
//! 无人机推流 / AI 分析控制台的认证与访问控制：
//! - `session`: 会话存储，登录/登出/管理员校验，所有写操作走同一入口
//! - `guard`: 导航守卫，纯函数
//! - `route`: 路由表（静态访问要求）
//! - `api` / `request`: 认证服务网关和可替换的 HTTP 传输层
//!
//! 与 DOM 无关，浏览器端由 `skydeck-frontend` 提供基于 fetch 的 [`HttpClient`] 实现。

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod request;
pub mod route;
pub mod session;

pub use config::ClientConfig;
pub use error::{AuthError, AuthResult};
pub use guard::{NavigationDecision, decide, decide_path};
pub use request::{HttpClient, HttpError, HttpRequest, HttpResponse};
pub use route::{AppRoute, ROUTES, RouteDescriptor};
pub use session::{Session, SessionInfo, SessionStore, SessionTransition};
pub use skydeck_shared::{Identity, Role, UserIdentity};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;
