//! SkyDeck 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `skydeck::route` / `skydeck::guard`: 路由表与守卫判定（与界面无关）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod admin;
    pub mod login;
    pub mod nav;
    pub mod pages;
}

use crate::auth::{AuthContext, client_config};
use crate::components::admin::AdminDashboardPage;
use crate::components::login::LoginPage;
use crate::components::nav::NavBar;
use crate::components::pages::{
    AboutPage, AiAnalysisPage, DroneStreamPage, HomePage, NotFoundPage, ProductMarketPage,
    ProjectIntroPage, TestPage,
};

use leptos::prelude::*;

// 浏览器 API 封装：路由、fetch、本地存储、超时
pub(crate) mod web {
    mod http;
    pub mod router;
    pub mod storage;
    mod timer;

    pub use http::FetchHttpClient;
}

use skydeck::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::ProjectIntro => view! { <ProjectIntroPage /> }.into_any(),
        AppRoute::About => view! { <AboutPage /> }.into_any(),
        AppRoute::Test => view! { <TestPage /> }.into_any(),
        AppRoute::DroneStream => view! { <DroneStreamPage /> }.into_any(),
        AppRoute::AiAnalysis => view! { <AiAnalysisPage /> }.into_any(),
        AppRoute::ProductMarket => view! { <ProductMarketPage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（服务地址与超时在编译期注入）
    let config = client_config();
    log::info!("[App] auth service at {}", config.api_base_url);
    let auth_ctx = AuthContext::new(config);
    provide_context(auth_ctx);

    // 2. 会话信号注入路由服务，路由不直接依赖认证模块
    let session = auth_ctx.session_signal();

    view! {
        <Router session=session>
            <NavBar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
