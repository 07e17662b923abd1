use crate::auth::use_auth;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use skydeck::{AppRoute, Role};

/// 导航栏中展示的链接
///
/// 受保护页面只对能通过守卫的会话显示，避免点了就被重定向。
fn visible_links(authenticated: bool, role: Role) -> Vec<(AppRoute, &'static str)> {
    let mut links = vec![
        (AppRoute::Home, "首页"),
        (AppRoute::ProjectIntro, "项目介绍"),
        (AppRoute::About, "关于"),
    ];
    if authenticated {
        links.push((AppRoute::DroneStream, "无人机推流"));
        links.push((AppRoute::AiAnalysis, "AI 分析"));
        links.push((AppRoute::Test, "测试"));
        match role {
            Role::User => links.push((AppRoute::ProductMarket, "产品市场")),
            Role::Admin => links.push((AppRoute::AdminDashboard, "管理后台")),
            Role::Guest => {}
        }
    }
    links
}

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let session = auth.session_signal();
    let (is_logging_out, set_is_logging_out) = signal(false);

    let on_logout = move |_| {
        set_is_logging_out.set(true);
        spawn_local(async move {
            auth.logout().await;
            set_is_logging_out.set(false);
        });
    };

    let links = move || {
        let snapshot = session.get();
        visible_links(snapshot.is_authenticated(), snapshot.role())
            .into_iter()
            .map(|(route, label)| {
                let class = if router.current_route().get() == route { "active" } else { "" };
                view! { <Link to=route class=class>{label}</Link> }
            })
            .collect_view()
    };

    view! {
        <nav class="navbar">
            <span class="navbar__brand">"SkyDeck"</span>
            <div class="navbar__links">{links}</div>
            <div class="navbar__user">
                {move || match session.get().user().cloned() {
                    Some(user) => view! {
                        <span class="navbar__username">{user.username}</span>
                        <button on:click=on_logout disabled=move || is_logging_out.get()>
                            "退出登录"
                        </button>
                    }
                    .into_any(),
                    None => view! { <Link to=AppRoute::Login>"登录"</Link> }.into_any(),
                }}
            </div>
        </nav>
    }
}
