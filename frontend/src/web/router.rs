//! 带守卫的 History 路由
//!
//! 每一次进入路由（首次加载、程序导航、后退/前进）都先经过
//! [`guard::check`]，守卫每次都重新读取 LocalStorage 中的会话。

use leptos::ev;
use leptos::prelude::*;
use log::info;
use portal_shared::guard::{self, GuardDecision};
use portal_shared::{AppRoute, Navigator, SessionStore};
use wasm_bindgen::JsValue;

use super::storage::LocalStorage;

fn location_route() -> AppRoute {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    AppRoute::from_path(&path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
}

fn write_history(route: AppRoute, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let path = Some(route.to_path());
    let written = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", path),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", path),
    };
    if written.is_err() {
        log::warn!("history update to {} failed", route);
    }
}

/// 导航状态：当前路由信号 + 会话访问器
#[derive(Clone, Copy)]
pub struct RouterService {
    route: RwSignal<AppRoute>,
    session: SessionStore<LocalStorage>,
}

impl RouterService {
    fn new() -> Self {
        let session = SessionStore::new(LocalStorage);
        let route = RwSignal::new(AppRoute::Login);
        let service = Self { route, session };
        // 首次加载：被拒绝时改写地址栏而不是新增历史记录
        service.enter(location_route(), HistoryMode::Replace);
        service
    }

    /// 守卫后的路由；被拒绝时记录原因
    fn admit(&self, target: AppRoute) -> AppRoute {
        let decision = guard::check(target, &self.session);
        if let GuardDecision::Redirect(to) = decision {
            info!("{} denied, redirecting to {}", target, to);
        }
        decision.resolve(target)
    }

    fn enter(&self, target: AppRoute, mode: HistoryMode) {
        let route = self.admit(target);
        let path_changed = route != target;
        match mode {
            HistoryMode::Push => write_history(route, HistoryMode::Push),
            HistoryMode::Replace if path_changed => write_history(route, HistoryMode::Replace),
            HistoryMode::Replace => {}
        }
        self.route.set(route);
    }

    pub fn route(&self) -> Signal<AppRoute> {
        self.route.into()
    }

    /// 程序导航，新增一条历史记录
    pub fn navigate_to(&self, target: AppRoute) {
        self.enter(target, HistoryMode::Push);
    }
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>().expect("RouterService should be provided by <Router>")
}

/// 会话失效时整页跳转到登录页，丢弃所有内存状态
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect_to_login(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window.location().set_href(AppRoute::Login.to_path()).is_err() {
            log::warn!("redirect to login failed");
        }
    }
}

/// 提供 [`RouterService`]，并让后退/前进同样经过守卫
#[component]
pub fn Router(children: Children) -> impl IntoView {
    let router = RouterService::new();
    provide_context(router);

    let handle = window_event_listener(ev::popstate, move |_| {
        router.enter(location_route(), HistoryMode::Replace);
    });
    on_cleanup(move || handle.remove());

    children()
}

/// 按当前路由渲染页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let route = use_router().route();
    move || matcher(route.get())
}
