//! 课程门户前端核心库
//!
//! 与浏览器无关的部分都放在这里，便于在宿主机上测试：
//! - `models` / `protocol`: 领域模型与接口定义
//! - `session` / `guard` / `route`: 会话访问器与路由守卫
//! - `gateway`: 统一的 HTTP 出口（Bearer 注入、401 处理、超时）
//! - `controller`: 各页面的视图状态与动作

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod concurrent;
pub mod config;
pub mod date;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod models;
pub mod protocol;
pub mod route;
pub mod serde_helper;
pub mod session;

pub mod controller {
    pub mod admin;
    pub mod banner;
    pub mod login;
    pub mod student;
}

pub use chrono;
pub use config::{ClientConfig, LoginPolicy};
pub use error::{PortalError, PortalErrorStatus, PortalResult};
pub use gateway::{ApiGateway, HttpClient, HttpMethod, HttpRequest, HttpResponse, Navigator};
pub use route::AppRoute;
pub use session::{KeyValueStore, MemoryStore, Session, SessionStore};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_ROLE_KEY: &str = "role";
pub const STORAGE_USER_ID_KEY: &str = "userId";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 角色 (Role)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            other => Err(PortalError::serialization(format!("unknown role `{}`", other))),
        }
    }
}
