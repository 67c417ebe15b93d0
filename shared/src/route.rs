//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问要求。

use std::fmt::Display;

use crate::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 管理后台 (需要 admin 角色)
    Admin,
    /// 学生面板 (需要 student 角色)
    Student,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" | "/login" => Self::Login,
            "/admin" | "/admin/dashboard" => Self::Admin,
            "/student" => Self::Student,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的规范 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Admin => "/admin",
            Self::Student => "/student",
            Self::NotFound => "/404",
        }
    }

    /// 访问该路由所需的角色；`None` 表示公开页面
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::Admin => Some(Role::Admin),
            Self::Student => Some(Role::Student),
            Self::Login | Self::NotFound => None,
        }
    }

    /// 守卫拒绝时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 登录成功后该角色的落地页
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Student => Self::Student,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
