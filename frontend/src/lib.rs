//! 课程门户前端应用
//!
//! 状态与业务规则都在 `portal-shared` 里，这里只有浏览器相关的部分：
//! - `web`: fetch / LocalStorage / History 的轻量封装
//! - `api`: 网关实例
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod admin;
    pub mod admin_dashboard;
    pub mod banner;
    pub mod header;
    pub mod login;
    pub mod student;
    pub mod student_dashboard;
}

use crate::api::provide_api;
use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::login::LoginPage;
use crate::components::student_dashboard::StudentDashboardPage;

use leptos::prelude::*;
use portal_shared::AppRoute;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-net / gloo-storage，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod dialog;
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use dialog::confirm;
    pub use http::FetchClient;
    pub use router::BrowserNavigator;
    pub use storage::LocalStorage;
    pub use timer::now;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Admin => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::Student => view! { <StudentDashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <a class="btn btn-link mt-2" href=AppRoute::Login.to_path()>"Back to login"</a>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 网关必须先于路由提供
    provide_api();

    view! {
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
