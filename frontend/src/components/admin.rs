use crate::auth::use_auth;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use skydeck::AppRoute;

/// 管理后台
///
/// 路由守卫只看本地会话里的角色，进入页面后再向服务端确认一次。
#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let session = auth.session_signal();
    let is_admin = auth.is_admin_signal();
    let (verified, set_verified) = signal(false);

    spawn_local(async move {
        if auth.check_admin().await {
            set_verified.set(true);
        } else {
            log::warn!("[Admin] server did not confirm admin role, leaving dashboard");
            router.navigate(AppRoute::Home.to_path());
        }
    });

    view! {
        <main class="page admin-dashboard">
            <h1 class="page__title">"管理后台"</h1>
            <Show
                when=move || verified.get() && is_admin.get()
                fallback=|| view! { <p class="admin-dashboard__pending">"正在确认管理员身份..."</p> }
            >
                <p>
                    "当前管理员："
                    {move || session.get().user().map(|u| u.username.clone()).unwrap_or_default()}
                </p>
            </Show>
        </main>
    }
}
