//! 认证模块
//!
//! 把 `skydeck::SessionStore` 包装成可注入的上下文。
//! 会话的每次提交都会同步到一个信号上，路由和组件只读这个信号。

use crate::web::FetchHttpClient;
use crate::web::storage;
use leptos::prelude::*;
use skydeck::config::{ENV_API_BASE, ENV_TIMEOUT_SECS};
use skydeck::{AuthResult, ClientConfig, Session, SessionInfo, SessionStore};

/// 浏览器端没有运行时环境变量，配置在编译期注入
pub fn client_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| {
        let value = match key {
            ENV_API_BASE => option_env!("SKYDECK_API_BASE"),
            ENV_TIMEOUT_SECS => option_env!("SKYDECK_REQUEST_TIMEOUT_SECS"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

/// 认证上下文
///
/// 可复制，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话快照（只读）
    session: ReadSignal<Session>,
    store: StoredValue<SessionStore<FetchHttpClient>>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new(config: ClientConfig) -> Self {
        let store = SessionStore::new(FetchHttpClient, config);
        let (session, set_session) = signal(store.snapshot());

        // 所有写入都经过 store 的提交入口，这里只负责镜像到信号
        store.on_change(move |snapshot| set_session.set(snapshot.clone()));

        Self {
            session,
            store: StoredValue::new(store),
        }
    }

    /// 会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        self.session.into()
    }

    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.get().is_authenticated())
    }

    pub fn is_admin_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.get().is_admin())
    }

    /// 登录，成功后记住用户名
    pub async fn login(&self, username: String, password: String) -> AuthResult<SessionInfo> {
        let store = self.store.get_value();
        let info = store.login(&username, &password).await?;
        storage::remember_username(&info.user.username);
        Ok(info)
    }

    /// 注销并清除状态
    ///
    /// 导航由路由服务监听会话变化自动处理。
    pub async fn logout(&self) {
        self.store.get_value().logout().await;
    }

    /// 向服务端确认管理员身份
    pub async fn check_admin(&self) -> bool {
        self.store.get_value().check_admin_status().await
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
