//! 内容页面
//!
//! 业务内容由各自的后端服务提供，这里只负责页面框架。

use crate::auth::use_auth;
use crate::web::router::Link;
use leptos::prelude::*;
use skydeck::AppRoute;

/// 页面通用外壳
#[component]
fn PageShell(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <main class="page">
            <h1 class="page__title">{title}</h1>
            <section class="page__body">{children()}</section>
        </main>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session_signal();

    let greeting = move || match session.get().user() {
        Some(user) => format!("欢迎回来，{}", user.username),
        None => "欢迎使用 SkyDeck".to_string(),
    };

    view! {
        <PageShell title="首页">
            <p>{greeting}</p>
            <Show
                when=move || session.get().is_authenticated()
                fallback=|| view! { <Link to=AppRoute::Login>"登录后使用推流与分析功能"</Link> }
            >
                <ul class="home__shortcuts">
                    <li><Link to=AppRoute::DroneStream>"无人机推流"</Link></li>
                    <li><Link to=AppRoute::AiAnalysis>"AI 分析"</Link></li>
                </ul>
            </Show>
        </PageShell>
    }
}

#[component]
pub fn ProjectIntroPage() -> impl IntoView {
    view! {
        <PageShell title="项目介绍">
            <p>"SkyDeck 将无人机实时画面接入平台，并交由 AI 模型做目标识别与分析。"</p>
        </PageShell>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <PageShell title="关于">
            <p>"SkyDeck 前端控制台。"</p>
        </PageShell>
    }
}

#[component]
pub fn TestPage() -> impl IntoView {
    let session = use_auth().session_signal();

    view! {
        <PageShell title="测试">
            <dl class="session-debug">
                <dt>"用户"</dt>
                <dd>{move || session.get().user().map(|u| u.username.clone()).unwrap_or_default()}</dd>
                <dt>"角色"</dt>
                <dd>{move || session.get().role().to_string()}</dd>
            </dl>
        </PageShell>
    }
}

#[component]
pub fn DroneStreamPage() -> impl IntoView {
    view! {
        <PageShell title="无人机推流">
            <p>"暂无在线设备。"</p>
        </PageShell>
    }
}

#[component]
pub fn AiAnalysisPage() -> impl IntoView {
    view! {
        <PageShell title="AI 分析">
            <p>"暂无分析任务。"</p>
        </PageShell>
    }
}

#[component]
pub fn ProductMarketPage() -> impl IntoView {
    view! {
        <PageShell title="产品市场">
            <p>"暂无上架产品。"</p>
        </PageShell>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="page page--not-found">
            <h1>"404"</h1>
            <p>"页面未找到"</p>
            <Link to=AppRoute::Home>"返回首页"</Link>
        </main>
    }
}
