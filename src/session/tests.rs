use super::*;
use crate::error::AuthError;
use crate::request::{HttpError, HttpRequest, HttpResponse, MockHttpClient};
use serde_json::json;
use std::cell::RefCell;
use std::sync::Mutex;
use std::time::Duration;

// =========================================================
// 辅助函数
// =========================================================

const LOGIN_URL: &str = "http://auth.test/auth/login";
const LOGOUT_URL: &str = "http://auth.test/auth/logout";
const CHECK_ADMIN_URL: &str = "http://auth.test/auth/check-admin";
const REGISTER_URL: &str = "http://auth.test/auth/register";

fn create_store() -> SessionStore<MockHttpClient> {
    let config = ClientConfig::new("http://auth.test").with_timeout(Duration::from_secs(5));
    SessionStore::new(MockHttpClient::new(), config)
}

fn mock_login(store: &SessionStore<MockHttpClient>, id: i64, username: &str, role: &str) {
    store.client.mock_response(
        LOGIN_URL,
        200,
        json!({ "message": "Login successful", "user_id": id, "username": username, "role": role }),
    );
}

fn pilot() -> UserIdentity {
    UserIdentity {
        id: 7,
        username: "pilot".into(),
        role: Role::User,
    }
}

// =========================================================
// 初始状态与只读查询
// =========================================================

#[test]
fn test_starts_unauthenticated() {
    let store = create_store();
    let session = store.snapshot();

    assert!(!session.is_authenticated());
    assert_eq!(session.role(), Role::Guest);
    assert!(session.user().is_none());
    assert!(!store.is_admin());
    assert!(store.current_user().is_none());
}

#[test]
fn test_authenticated_session_takes_role_from_user() {
    let session = Session::authenticated(pilot());
    assert!(session.is_authenticated());
    assert_eq!(session.role(), Role::User);
    assert!(!session.is_admin());
}

// =========================================================
// login
// =========================================================

#[tokio::test]
async fn test_login_admin_then_is_admin() {
    let store = create_store();
    mock_login(&store, 1, "a", "admin");

    let info = store.login("a", "pw").await.unwrap();

    assert_eq!(info.user.id, 1);
    assert_eq!(info.message.as_deref(), Some("Login successful"));
    assert!(store.is_authenticated());
    assert!(store.is_admin());
    assert_eq!(store.current_user().unwrap().username, "a");
}

#[tokio::test]
async fn test_login_failure_leaves_session_untouched() {
    let store = create_store();
    store
        .client
        .mock_response(LOGIN_URL, 401, json!({ "error": "Invalid credentials" }));

    let err = store.login("a", "wrong").await.unwrap_err();

    assert_eq!(err, AuthError::InvalidCredentials);
    assert_eq!(store.snapshot(), Session::guest());
    assert_eq!(store.epoch(), 0);
}

#[tokio::test]
async fn test_failed_relogin_keeps_previous_session() {
    let store = create_store();
    mock_login(&store, 1, "a", "user");
    store.login("a", "pw").await.unwrap();

    store
        .client
        .mock_failure(LOGIN_URL, HttpError::Network("connection refused".into()));
    let err = store.login("b", "pw").await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(store.current_user().unwrap().username, "a");
}

// =========================================================
// logout
// =========================================================

#[tokio::test]
async fn test_logout_clears_session_on_success() {
    let store = create_store();
    mock_login(&store, 1, "a", "admin");
    store.login("a", "pw").await.unwrap();
    store
        .client
        .mock_response(LOGOUT_URL, 200, json!({ "message": "Logout successful" }));

    store.logout().await;

    assert!(!store.is_authenticated());
    assert_eq!(store.snapshot(), Session::guest());
}

#[tokio::test]
async fn test_logout_clears_session_when_network_fails() {
    let store = create_store();
    mock_login(&store, 1, "a", "user");
    store.login("a", "pw").await.unwrap();
    store
        .client
        .mock_failure(LOGOUT_URL, HttpError::Network("offline".into()));

    store.logout().await;

    assert!(!store.is_authenticated());
    assert!(store.current_user().is_none());
    assert_eq!(store.snapshot().role(), Role::Guest);
}

#[tokio::test]
async fn test_logout_clears_session_on_server_error() {
    let store = create_store();
    store.set_session(pilot());
    store
        .client
        .mock_response(LOGOUT_URL, 500, json!({ "error": "db down" }));

    store.logout().await;

    assert!(!store.is_authenticated());
}

// =========================================================
// check_admin_status
// =========================================================

#[tokio::test]
async fn test_check_admin_without_session_sends_nothing() {
    let store = create_store();

    assert!(!store.check_admin_status().await);
    assert_eq!(store.client.request_count(), 0);
}

#[tokio::test]
async fn test_check_admin_promotes_user() {
    let store = create_store();
    store.set_session(pilot());
    store
        .client
        .mock_response(CHECK_ADMIN_URL, 200, json!({ "isAdmin": true }));

    assert!(store.check_admin_status().await);
    assert!(store.is_admin());
    assert_eq!(store.current_user().unwrap().role, Role::Admin);
}

#[tokio::test]
async fn test_check_admin_negative_keeps_role() {
    let store = create_store();
    store.set_session(pilot());
    store
        .client
        .mock_response(CHECK_ADMIN_URL, 200, json!({ "isAdmin": false }));

    assert!(!store.check_admin_status().await);
    assert_eq!(store.snapshot().role(), Role::User);
}

#[tokio::test]
async fn test_check_admin_failure_fails_closed_without_mutation() {
    let store = create_store();
    store.set_session(pilot());
    store
        .client
        .mock_failure(CHECK_ADMIN_URL, HttpError::Timeout(Duration::from_secs(5)));
    let before = store.snapshot();

    assert!(!store.check_admin_status().await);
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_check_admin_sets_timeout() {
    let store = create_store();
    store.set_session(pilot());
    store
        .client
        .mock_response(CHECK_ADMIN_URL, 200, json!({ "isAdmin": false }));

    store.check_admin_status().await;

    let reqs = store.client.requests.borrow();
    assert_eq!(reqs[0].timeout, Some(Duration::from_secs(5)));
}

/// 回复前先执行钩子的客户端，用来模拟请求在途时会话被替换
struct InterleavingClient {
    before_reply: RefCell<Option<Box<dyn Fn()>>>,
    body: serde_json::Value,
}

#[async_trait::async_trait(?Send)]
impl HttpClient for InterleavingClient {
    async fn send(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        if let Some(hook) = self.before_reply.borrow().as_ref() {
            hook();
        }
        Ok(HttpResponse {
            status: 200,
            body: self.body.to_string(),
        })
    }
}

fn interleaving_store(
    hook: impl Fn(&SessionStore<InterleavingClient>) + 'static,
) -> SessionStore<InterleavingClient> {
    let config = ClientConfig::new("http://auth.test");
    let store = SessionStore::new(
        InterleavingClient {
            before_reply: RefCell::new(None),
            body: json!({ "isAdmin": true }),
        },
        config,
    );
    let handle = store.clone();
    *store.client.before_reply.borrow_mut() = Some(Box::new(move || hook(&handle)));
    store
}

#[tokio::test]
async fn test_admin_confirmation_after_logout_is_dropped() {
    let store = interleaving_store(|s| s.clear_session());
    store.set_session(pilot());

    assert!(!store.check_admin_status().await);
    assert!(!store.is_admin());
    assert!(!store.is_authenticated());
    assert_eq!(store.snapshot(), Session::guest());
}

#[tokio::test]
async fn test_admin_confirmation_for_replaced_user_is_dropped() {
    let store = interleaving_store(|s| {
        s.set_session(UserIdentity {
            id: 8,
            username: "viewer".into(),
            role: Role::User,
        });
    });
    store.set_session(pilot());

    assert!(!store.check_admin_status().await);
    assert!(!store.is_admin());
    let user = store.current_user().unwrap();
    assert_eq!(user.username, "viewer");
    assert_eq!(user.role, Role::User);
}

// =========================================================
// register
// =========================================================

#[tokio::test]
async fn test_register_leaves_session_untouched() {
    let store = create_store();
    mock_login(&store, 1, "a", "admin");
    store.login("a", "pw").await.unwrap();
    let before = store.snapshot();
    let epoch = store.epoch();

    store.client.mock_response(
        REGISTER_URL,
        201,
        json!({ "message": "User created successfully", "user_id": 12 }),
    );
    let resp = store
        .register("newbie", "pw", Identity::User, None)
        .await
        .unwrap();

    assert_eq!(resp.account_id(), Some(12));
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.epoch(), epoch);
}

#[tokio::test]
async fn test_failed_register_leaves_session_untouched() {
    let store = create_store();
    store.set_session(pilot());
    let before = store.snapshot();
    let epoch = store.epoch();

    store.client.mock_response(
        REGISTER_URL,
        409,
        json!({ "error": "Username already exists" }),
    );
    let err = store
        .register("pilot", "pw", Identity::User, None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AuthError::Rejected { status: 409, message: "Username already exists".into() }
    );
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.epoch(), epoch);
}

// =========================================================
// commit / 变更入口
// =========================================================

#[test]
fn test_sign_in_rejects_guest_role() {
    let store = create_store();
    let applied = store.set_session(UserIdentity {
        id: 3,
        username: "ghost".into(),
        role: Role::Guest,
    });

    assert!(!applied);
    assert!(!store.is_authenticated());
    assert_eq!(store.epoch(), 0);
}

#[test]
fn test_stale_role_refresh_is_discarded() {
    let store = create_store();
    store.set_session(pilot());
    let stale_epoch = store.epoch();

    // 在管理员校验返回之前用户已登出
    store.clear_session();

    let applied = store.commit(SessionTransition::SetRole {
        role: Role::Admin,
        epoch: stale_epoch,
    });
    assert!(!applied);
    assert_eq!(store.snapshot(), Session::guest());
}

#[test]
fn test_set_role_requires_authentication() {
    let store = create_store();
    assert!(!store.set_role(Role::Admin));
    assert_eq!(store.snapshot().role(), Role::Guest);
}

#[test]
fn test_set_role_cannot_demote_to_guest() {
    let store = create_store();
    store.set_session(pilot());
    assert!(!store.set_role(Role::Guest));
    assert!(store.is_authenticated());
    assert_eq!(store.snapshot().role(), Role::User);
}

#[test]
fn test_last_write_wins() {
    let store = create_store();
    store.set_session(pilot());
    store.clear_session();
    store.set_session(UserIdentity {
        id: 2,
        username: "chief".into(),
        role: Role::Admin,
    });

    assert_eq!(store.current_user().unwrap().username, "chief");
    assert_eq!(store.epoch(), 3);
}

#[test]
fn test_listeners_receive_committed_snapshots() {
    let store = create_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.on_change(move |session| {
        sink.lock().unwrap().push(session.is_authenticated());
    });

    store.set_session(pilot());
    store.set_role(Role::Guest); // 被拒绝，不通知
    store.clear_session();

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

#[test]
fn test_clones_share_state() {
    let store = create_store();
    let other = store.clone();

    other.set_session(pilot());

    assert!(store.is_authenticated());
}
