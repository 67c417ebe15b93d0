//! 认证模块
//!
//! 会话只存在于 LocalStorage，这里只负责登出。

use log::info;
use portal_shared::controller::login;

use crate::api::PortalApi;
use crate::web::router::RouterService;

/// 注销：清空会话后回到登录页
pub fn logout(api: &PortalApi, router: RouterService) {
    let route = login::sign_out(api.session());
    info!("signed out");
    router.navigate_to(route);
}
