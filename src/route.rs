//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问要求，路由守卫只读这张静态表。

use skydeck_shared::Role;
use std::fmt::Display;

/// 路由的访问要求（静态配置，运行期只读）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    /// 是否需要登录
    pub required: bool,
    /// 需要的角色，`None` 表示登录即可
    pub required_role: Option<Role>,
}

impl RouteDescriptor {
    const fn public(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            required: false,
            required_role: None,
        }
    }

    const fn protected(path: &'static str, name: &'static str, role: Option<Role>) -> Self {
        Self {
            path,
            name,
            required: true,
            required_role: role,
        }
    }

    /// 在路由表中按路径查找
    pub fn find(path: &str) -> Option<&'static RouteDescriptor> {
        let path = normalize(path);
        ROUTES.iter().find(|r| r.path == path)
    }
}

/// 路由表
pub static ROUTES: [RouteDescriptor; 9] = [
    RouteDescriptor::public("/home", "home"),
    RouteDescriptor::public("/login", "login"),
    RouteDescriptor::public("/project-intro", "projectIntro"),
    RouteDescriptor::public("/about", "about"),
    RouteDescriptor::protected("/test", "test", None),
    RouteDescriptor::protected("/drone-stream", "droneStream", None),
    RouteDescriptor::protected("/ai-analysis", "aiAnalysis", None),
    RouteDescriptor::protected("/product-market", "productMarket", Some(Role::User)),
    RouteDescriptor::protected("/admin", "adminDashboard", Some(Role::Admin)),
];

static NOT_FOUND: RouteDescriptor = RouteDescriptor::public("/404", "notFound");

/// 去掉查询串、锚点和结尾的 `/`
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 首页 (默认路由，`/` 会重定向到这里)
    #[default]
    Home,
    Login,
    ProjectIntro,
    About,
    Test,
    DroneStream,
    AiAnalysis,
    /// 仅普通用户
    ProductMarket,
    /// 仅管理员
    AdminDashboard,
    NotFound,
}

impl AppRoute {
    pub const ALL: [AppRoute; 10] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::ProjectIntro,
        AppRoute::About,
        AppRoute::Test,
        AppRoute::DroneStream,
        AppRoute::AiAnalysis,
        AppRoute::ProductMarket,
        AppRoute::AdminDashboard,
        AppRoute::NotFound,
    ];

    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match normalize(path) {
            "/" | "/home" => Self::Home,
            "/login" => Self::Login,
            "/project-intro" => Self::ProjectIntro,
            "/about" => Self::About,
            "/test" => Self::Test,
            "/drone-stream" => Self::DroneStream,
            "/ai-analysis" => Self::AiAnalysis,
            "/product-market" => Self::ProductMarket,
            "/admin" => Self::AdminDashboard,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        self.descriptor().path
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// 路由的访问要求
    pub fn descriptor(&self) -> &'static RouteDescriptor {
        match self {
            Self::Home => &ROUTES[0],
            Self::Login => &ROUTES[1],
            Self::ProjectIntro => &ROUTES[2],
            Self::About => &ROUTES[3],
            Self::Test => &ROUTES[4],
            Self::DroneStream => &ROUTES[5],
            Self::AiAnalysis => &ROUTES[6],
            Self::ProductMarket => &ROUTES[7],
            Self::AdminDashboard => &ROUTES[8],
            Self::NotFound => &NOT_FOUND,
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.descriptor().required
    }

    /// 未登录时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 角色不符时的重定向目标
    pub fn role_mismatch_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
