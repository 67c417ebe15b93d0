//! 浏览器端的 API 网关实例

use leptos::prelude::*;
use portal_shared::config::{ENV_API_URL, ENV_LOGIN_POLICY, ENV_REQUEST_TIMEOUT_MS};
use portal_shared::{ApiGateway, ClientConfig};

use crate::web::{BrowserNavigator, FetchClient, LocalStorage};

pub type PortalApi = ApiGateway<FetchClient, LocalStorage, BrowserNavigator>;

/// 编译期注入的配置（`PORTAL_API_URL=... trunk build`）
fn build_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| {
        let value = match key {
            ENV_API_URL => option_env!("PORTAL_API_URL"),
            ENV_REQUEST_TIMEOUT_MS => option_env!("PORTAL_REQUEST_TIMEOUT_MS"),
            ENV_LOGIN_POLICY => option_env!("PORTAL_LOGIN_POLICY"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

pub fn provide_api() {
    let config = build_config();
    log::info!(
        "api base {} (timeout {} ms, policy {:?})",
        config.api_base_url,
        config.request_timeout.as_millis(),
        config.login_policy
    );
    provide_context(ApiGateway::new(
        config,
        FetchClient,
        LocalStorage,
        BrowserNavigator,
    ));
}

/// 从 Context 获取网关，包装为 `Copy` 的 `StoredValue` 便于在闭包间传递
pub fn use_api() -> StoredValue<PortalApi> {
    StoredValue::new(use_context::<PortalApi>().expect("PortalApi should be provided"))
}
