//! 会话存储
//!
//! 持有当前用户的认证状态，负责登录/登出/管理员校验的远程调用。
//! 所有写操作都经过 [`SessionStore::commit`] 这一个入口，整个状态在一次写锁内替换，
//! 路由守卫读到的永远是一次完整提交后的快照。

use crate::api::AuthGateway;
use crate::config::ClientConfig;
use crate::error::{AuthError, AuthResult};
use crate::request::HttpClient;
use skydeck_shared::protocol::RegisterResponse;
use skydeck_shared::{Identity, Role, UserIdentity};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

// =========================================================
// 会话模型
// =========================================================

/// 客户端持有的认证状态
///
/// 字段只读：未认证时 `role == Guest` 且 `user == None`，
/// 只能通过构造函数和 [`SessionTransition`] 得到新值。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    user: Option<UserIdentity>,
    authenticated: bool,
    role: Role,
}

impl Session {
    /// 未登录的默认状态
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn authenticated(user: UserIdentity) -> Self {
        Self {
            role: user.role,
            user: Some(user),
            authenticated: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.authenticated && self.role == Role::Admin
    }
}

/// 登录成功后返回给调用方的信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub user: UserIdentity,
    /// 服务端附带的提示，如 "Login successful"
    pub message: Option<String>,
}

/// 会话状态的全部合法变更
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// 登录成功，整体替换会话
    SignIn(UserIdentity),
    /// 登出或认证失效，回到默认状态
    SignOut,
    /// 刷新角色；`epoch` 与当前不一致说明会话已被替换，本次变更丢弃
    SetRole { role: Role, epoch: u64 },
}

// =========================================================
// 存储
// =========================================================

#[derive(Default)]
struct SessionState {
    session: Session,
    /// 每次 SignIn / SignOut 递增
    epoch: u64,
}

type Listener = Box<dyn Fn(&Session) + Send + Sync>;

/// 会话存储
///
/// 克隆开销很小，所有克隆共享同一份状态，可以作为上下文注入到路由和组件中。
pub struct SessionStore<C: HttpClient> {
    client: Arc<C>,
    config: Arc<ClientConfig>,
    state: Arc<RwLock<SessionState>>,
    listeners: Arc<RwLock<Vec<Listener>>>,
}

impl<C: HttpClient> Clone for SessionStore<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<C: HttpClient> SessionStore<C> {
    pub fn new(client: C, config: ClientConfig) -> Self {
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
            state: Arc::new(RwLock::new(SessionState::default())),
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn gateway(&self) -> AuthGateway<'_, C> {
        AuthGateway::new(&self.client, &self.config)
    }

    // 写锁内只做整体赋值，即使锁中毒状态也是完整的
    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    // --- 只读查询 ---

    /// 最近一次提交的会话快照
    pub fn snapshot(&self) -> Session {
        self.read().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.read().session.user().cloned()
    }

    pub fn is_admin(&self) -> bool {
        self.read().session.is_admin()
    }

    pub fn epoch(&self) -> u64 {
        self.read().epoch
    }

    /// 注册状态变更回调，每次提交成功后以新快照调用
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(listener));
    }

    // --- 唯一的写入口 ---

    /// 应用一次状态变更，返回是否生效
    pub fn commit(&self, transition: SessionTransition) -> bool {
        let snapshot = {
            let mut state = self.write();
            match transition {
                SessionTransition::SignIn(user) => {
                    // 已认证的会话不能是 guest 角色
                    if user.role == Role::Guest {
                        return false;
                    }
                    state.session = Session::authenticated(user);
                    state.epoch += 1;
                }
                SessionTransition::SignOut => {
                    state.session = Session::guest();
                    state.epoch += 1;
                }
                SessionTransition::SetRole { role, epoch } => {
                    if epoch != state.epoch || !state.session.authenticated || role == Role::Guest
                    {
                        return false;
                    }
                    state.session.role = role;
                    if let Some(user) = state.session.user.as_mut() {
                        user.role = role;
                    }
                }
            }
            state.session.clone()
        };

        // 回调在锁外执行，回调里可以安全地读取 store
        let listeners = self.listeners.read().unwrap_or_else(|e| e.into_inner());
        for listener in listeners.iter() {
            listener(&snapshot);
        }
        true
    }

    /// 直接写入已认证会话，guest 角色被拒绝
    pub fn set_session(&self, user: UserIdentity) -> bool {
        self.commit(SessionTransition::SignIn(user))
    }

    pub fn clear_session(&self) {
        self.commit(SessionTransition::SignOut);
    }

    /// 修改当前会话的角色，未登录时无效
    pub fn set_role(&self, role: Role) -> bool {
        let epoch = self.epoch();
        self.commit(SessionTransition::SetRole { role, epoch })
    }

    // --- 远程操作 ---

    /// 登录
    ///
    /// 失败时会话保持不变，错误原样返回给调用方。
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<SessionInfo> {
        let resp = match self.gateway().login(username, password).await {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("[Session] login failed for '{}': {}", username.trim(), e);
                return Err(e);
            }
        };

        let user = UserIdentity {
            id: resp.user_id,
            username: resp.username,
            role: resp.role,
        };
        if !self.commit(SessionTransition::SignIn(user.clone())) {
            return Err(AuthError::InvalidResponse(format!(
                "cannot sign in with role {}",
                user.role
            )));
        }
        log::info!("[Session] signed in as '{}' ({})", user.username, user.role);

        Ok(SessionInfo {
            user,
            message: resp.message,
        })
    }

    /// 登出
    ///
    /// 远程通知尽力而为，失败只记日志；无论结果如何本地会话都会被清空。
    pub async fn logout(&self) {
        if let Err(e) = self.gateway().logout().await {
            log::warn!("[Session] logout notification failed: {}", e);
        }
        self.commit(SessionTransition::SignOut);
        log::info!("[Session] signed out");
    }

    /// 向服务端确认管理员身份
    ///
    /// 未登录时直接返回 false，不发请求。服务端确认后把角色提升为 admin；
    /// 任何失败都当作"不是管理员"，不修改会话。
    pub async fn check_admin_status(&self) -> bool {
        let epoch = {
            let state = self.read();
            if !state.session.is_authenticated() {
                return false;
            }
            state.epoch
        };

        match self.gateway().check_admin().await {
            Ok(true) => {
                let applied = self.commit(SessionTransition::SetRole {
                    role: Role::Admin,
                    epoch,
                });
                if applied {
                    log::info!("[Session] admin status confirmed");
                } else {
                    log::debug!("[Session] admin confirmation arrived for a replaced session, ignored");
                }
                applied
            }
            Ok(false) => false,
            Err(e) => {
                log::warn!("[Session] admin check failed: {}", e);
                false
            }
        }
    }

    /// 注册新账号，不影响当前会话
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        identity: Identity,
        invite_code: Option<&str>,
    ) -> AuthResult<RegisterResponse> {
        let resp = self
            .gateway()
            .register(username, password, identity, invite_code)
            .await?;
        log::info!("[Session] registered '{}' as {:?}", username.trim(), identity);
        Ok(resp)
    }
}

#[cfg(test)]
mod tests;
