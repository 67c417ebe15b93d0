//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现共享库的 [`KeyValueStore`]。

use portal_shared::KeyValueStore;

/// 浏览器 LocalStorage
///
/// 无状态，每次操作都重新获取 Storage 实例。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 存储不可用（隐私模式、配额已满）时返回 `false`
    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
