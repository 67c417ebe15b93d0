//! 客户端运行配置
//!
//! 浏览器里没有进程环境变量，前端在编译期用 `option_env!` 读取，
//! 再通过 [`ClientConfig::from_lookup`] 交给这里统一解析。

use std::time::Duration;

use crate::Role;

pub const DEFAULT_API_URL: &str = "http://localhost:4000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_API_URL: &str = "PORTAL_API_URL";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "PORTAL_REQUEST_TIMEOUT_MS";
pub const ENV_LOGIN_POLICY: &str = "PORTAL_LOGIN_POLICY";

/// 哪些角色可以通过本客户端登录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPolicy {
    /// 只保留管理员会话，学生会话在写入后立即丢弃
    #[default]
    AdminOnly,
    AnyRole,
}

impl LoginPolicy {
    pub fn admits(&self, role: Role) -> bool {
        match self {
            LoginPolicy::AdminOnly => role == Role::Admin,
            LoginPolicy::AnyRole => true,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" | "admin_only" | "admin-only" => Some(LoginPolicy::AdminOnly),
            "any" | "any_role" | "any-role" => Some(LoginPolicy::AnyRole),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 不带结尾斜杠的 API 根地址
    pub api_base_url: String,
    /// 单次请求的时间上限
    pub request_timeout: Duration,
    pub login_policy: LoginPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            login_policy: LoginPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// 从键值查询函数构造配置，缺失或无法解析的项使用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(ENV_API_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout = lookup(ENV_REQUEST_TIMEOUT_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let login_policy = lookup(ENV_LOGIN_POLICY)
            .and_then(|v| LoginPolicy::parse(&v))
            .unwrap_or_default();

        Self::new(api_base_url, request_timeout, login_policy)
    }

    pub fn new(api_base_url: impl Into<String>, request_timeout: Duration, login_policy: LoginPolicy) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            request_timeout,
            login_policy,
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}
