//! 登录页状态

use log::{info, warn};

use crate::config::LoginPolicy;
use crate::gateway::{ApiGateway, HttpClient, Navigator};
use crate::protocol::LoginRequest;
use crate::route::AppRoute;
use crate::session::{KeyValueStore, Session};
use crate::Role;

pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_ADMIN_ONLY: &str = "Admin access only.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub phase: LoginPhase,
}

impl LoginState {
    /// 邮箱和密码都已填写，且没有请求在途
    pub fn can_submit(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty() && !self.is_submitting()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == LoginPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoginPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// 进入提交中；不满足提交条件时返回 `false`
    pub fn begin_submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.phase = LoginPhase::Submitting;
        true
    }

    /// 应用登录结果，返回需要跳转到的路由
    pub fn finish(&mut self, outcome: &LoginOutcome) -> Option<AppRoute> {
        match outcome {
            LoginOutcome::Admitted(session) => {
                self.phase = LoginPhase::Idle;
                Some(AppRoute::home_for(session.role))
            }
            LoginOutcome::Refused => {
                self.phase = LoginPhase::Failed(MSG_ADMIN_ONLY.to_string());
                None
            }
            LoginOutcome::Failed(msg) => {
                self.phase = LoginPhase::Failed(msg.clone());
                None
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// 会话已写入存储
    Admitted(Session),
    /// 角色不被登录策略接受，会话已清除
    Refused,
    Failed(String),
}

/// 登录并按登录策略决定是否保留会话
pub async fn sign_in<C, K, N>(
    api: &ApiGateway<C, K, N>,
    email: &str,
    password: &str,
) -> LoginOutcome
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    let req = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let resp = match api.call(&req).await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("login failed: {}", e);
            return LoginOutcome::Failed(e.banner_text(MSG_LOGIN_FAILED));
        }
    };

    let role: Role = match resp.role.parse() {
        Ok(role) => role,
        Err(e) => {
            warn!("login returned unusable role: {}", e);
            api.session().clear();
            return match api.config().login_policy {
                LoginPolicy::AdminOnly => LoginOutcome::Refused,
                LoginPolicy::AnyRole => LoginOutcome::Failed(MSG_LOGIN_FAILED.to_string()),
            };
        }
    };

    let session = Session::new(resp.token, role, resp.user_id);
    if let Err(e) = api.session().save(&session) {
        warn!("login session not persisted: {}", e);
        return LoginOutcome::Failed(e.banner_text(MSG_LOGIN_FAILED));
    }

    if !api.config().login_policy.admits(role) {
        info!("login refused for role {}", role);
        api.session().clear();
        return LoginOutcome::Refused;
    }

    info!("signed in as {}", role);
    LoginOutcome::Admitted(session)
}

/// 登出：清空会话，返回登录页路由
pub fn sign_out<K: KeyValueStore>(session: &crate::session::SessionStore<K>) -> AppRoute {
    session.clear();
    AppRoute::Login
}
