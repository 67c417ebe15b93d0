//! 会话访问器
//!
//! 守卫、网关和各控制器都只通过 [`SessionStore`] 读写会话，
//! 底层存储由 [`KeyValueStore`] 注入（浏览器里是 localStorage，测试里是内存）。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{PortalError, PortalResult};
use crate::{Role, STORAGE_ROLE_KEY, STORAGE_TOKEN_KEY, STORAGE_USER_ID_KEY};

/// 最小的字符串键值存储接口
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 已认证身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub user_id: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role, user_id: Option<String>) -> Self {
        Self {
            token: token.into(),
            role,
            user_id,
        }
    }
}

/// 会话访问器
///
/// 不缓存任何内容：每次读取都直接访问底层存储。
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore<K> {
    store: K,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store
            .get(STORAGE_TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    /// 存储中的角色；无法识别的值视为没有角色
    pub fn role(&self) -> Option<Role> {
        self.store.get(STORAGE_ROLE_KEY)?.parse().ok()
    }

    pub fn user_id(&self) -> Option<String> {
        self.store
            .get(STORAGE_USER_ID_KEY)
            .filter(|u| !u.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// 读取完整会话（需要 token 和可识别的角色）
    pub fn load(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            role: self.role()?,
            user_id: self.user_id(),
        })
    }

    /// 写入会话；没有 userId 时同时清掉旧值，避免串号
    ///
    /// 任意一个键写入失败都会回滚全部三个键，不留下半个会话。
    pub fn save(&self, session: &Session) -> PortalResult<()> {
        let written = self.store.set(STORAGE_TOKEN_KEY, &session.token)
            && self.store.set(STORAGE_ROLE_KEY, session.role.as_str())
            && match &session.user_id {
                Some(id) => self.store.set(STORAGE_USER_ID_KEY, id),
                None => {
                    self.store.delete(STORAGE_USER_ID_KEY);
                    true
                }
            };
        if !written {
            self.clear();
            return Err(PortalError::storage("failed to persist session"));
        }
        Ok(())
    }

    /// 清除全部三个会话键
    pub fn clear(&self) {
        self.store.delete(STORAGE_TOKEN_KEY);
        self.store.delete(STORAGE_ROLE_KEY);
        self.store.delete(STORAGE_USER_ID_KEY);
    }
}

// =========================================================
// 内存实现（测试与非浏览器环境）
// =========================================================

/// 共享的内存键值存储，clone 之后指向同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}
