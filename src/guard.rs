//! 导航守卫
//!
//! 纯函数：输入目标路由的访问要求和会话快照，输出放行或重定向。
//! 不读取任何隐藏状态，不发网络请求，也不会失败。

use crate::route::{AppRoute, RouteDescriptor};
use crate::session::Session;

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(AppRoute),
}

impl NavigationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }
}

/// **核心守卫逻辑**
///
/// 1. 不需要登录 → 放行
/// 2. 未登录 → 登录页
/// 3. 声明了角色且不符 → 首页
/// 4. 其余放行
pub fn decide(target: &RouteDescriptor, session: &Session) -> NavigationDecision {
    if !target.required {
        return NavigationDecision::Allow;
    }

    if !session.is_authenticated() {
        log::debug!("[Guard] {} requires login", target.path);
        return NavigationDecision::Redirect(AppRoute::auth_failure_redirect());
    }

    if let Some(required) = target.required_role {
        if session.role() != required {
            log::debug!(
                "[Guard] {} requires role {}, session has {}",
                target.path,
                required,
                session.role()
            );
            return NavigationDecision::Redirect(AppRoute::role_mismatch_redirect());
        }
    }

    NavigationDecision::Allow
}

/// 按路径判定，路由表里没有的路径直接放行
pub fn decide_path(path: &str, session: &Session) -> NavigationDecision {
    match RouteDescriptor::find(path) {
        Some(descriptor) => decide(descriptor, session),
        None => NavigationDecision::Allow,
    }
}

/// 最终应渲染的路由
///
/// 重定向目标本身都是公开页面，所以只需判定一次。
pub fn resolve(target: AppRoute, session: &Session) -> AppRoute {
    match decide(target.descriptor(), session) {
        NavigationDecision::Allow => target,
        NavigationDecision::Redirect(redirect) => redirect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::ROUTES;
    use skydeck_shared::{Role, UserIdentity};

    fn session_with(role: Role) -> Session {
        Session::authenticated(UserIdentity {
            id: 1,
            username: "u".into(),
            role,
        })
    }

    fn all_sessions() -> Vec<Session> {
        vec![Session::guest(), session_with(Role::User), session_with(Role::Admin)]
    }

    #[test]
    fn public_routes_always_allowed() {
        for route in ROUTES.iter().filter(|r| !r.required) {
            for session in all_sessions() {
                assert_eq!(decide(route, &session), NavigationDecision::Allow, "{}", route.path);
            }
        }
    }

    #[test]
    fn protected_routes_send_guests_to_login() {
        for route in ROUTES.iter().filter(|r| r.required) {
            assert_eq!(
                decide(route, &Session::guest()),
                NavigationDecision::Redirect(AppRoute::Login),
                "{}",
                route.path
            );
        }
    }

    #[test]
    fn admin_route_sends_non_admins_home() {
        let admin = AppRoute::AdminDashboard.descriptor();
        assert_eq!(
            decide(admin, &session_with(Role::User)),
            NavigationDecision::Redirect(AppRoute::Home)
        );
        assert_eq!(decide(admin, &session_with(Role::Admin)), NavigationDecision::Allow);
    }

    #[test]
    fn user_route_is_exact_role_match() {
        let market = AppRoute::ProductMarket.descriptor();
        assert!(decide(market, &session_with(Role::User)).is_allowed());
        assert_eq!(
            decide(market, &session_with(Role::Admin)),
            NavigationDecision::Redirect(AppRoute::Home)
        );
    }

    #[test]
    fn auth_only_routes_accept_any_role() {
        let stream = AppRoute::DroneStream.descriptor();
        assert!(decide(stream, &session_with(Role::User)).is_allowed());
        assert!(decide(stream, &session_with(Role::Admin)).is_allowed());
    }

    #[test]
    fn ad_hoc_descriptor() {
        let route = RouteDescriptor {
            path: "/ops",
            name: "ops",
            required: true,
            required_role: Some(Role::Admin),
        };
        assert_eq!(
            decide(&route, &Session::guest()),
            NavigationDecision::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn unknown_paths_are_allowed() {
        for session in all_sessions() {
            assert!(decide_path("/does/not/exist", &session).is_allowed());
        }
        assert_eq!(
            decide_path("/admin", &Session::guest()),
            NavigationDecision::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn resolve_picks_render_target() {
        assert_eq!(resolve(AppRoute::Test, &Session::guest()), AppRoute::Login);
        assert_eq!(resolve(AppRoute::AdminDashboard, &session_with(Role::User)), AppRoute::Home);
        assert_eq!(resolve(AppRoute::About, &Session::guest()), AppRoute::About);
        assert_eq!(resolve(AppRoute::NotFound, &Session::guest()), AppRoute::NotFound);
    }
}
