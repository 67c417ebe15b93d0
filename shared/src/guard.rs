//! 路由守卫
//!
//! 每次判定都重新读取会话存储，不做任何缓存。

use log::debug;

use crate::route::AppRoute;
use crate::session::{KeyValueStore, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(AppRoute),
}

impl GuardDecision {
    /// 最终落到的路由
    pub fn resolve(self, target: AppRoute) -> AppRoute {
        match self {
            GuardDecision::Allow => target,
            GuardDecision::Redirect(to) => to,
        }
    }
}

/// 判定是否允许进入 `target`
///
/// 受保护路由需要同时满足：存在 token，且存储中的角色等于要求的角色。
pub fn check<K: KeyValueStore>(target: AppRoute, session: &SessionStore<K>) -> GuardDecision {
    let Some(required) = target.required_role() else {
        return GuardDecision::Allow;
    };

    if !session.has_token() {
        debug!("guard: no token, {} -> login", target);
        return GuardDecision::Redirect(AppRoute::auth_failure_redirect());
    }

    match session.role() {
        Some(role) if role == required => GuardDecision::Allow,
        other => {
            debug!(
                "guard: role {:?} does not satisfy {} for {}",
                other, required, target
            );
            GuardDecision::Redirect(AppRoute::auth_failure_redirect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStore, Session};
    use crate::{Role, STORAGE_ROLE_KEY, STORAGE_TOKEN_KEY};

    fn store() -> (MemoryStore, SessionStore<MemoryStore>) {
        let memory = MemoryStore::new();
        (memory.clone(), SessionStore::new(memory))
    }

    #[test]
    fn protected_routes_without_token_redirect_to_login() {
        let (_, session) = store();
        for route in [AppRoute::Admin, AppRoute::Student] {
            assert_eq!(
                check(route, &session),
                GuardDecision::Redirect(AppRoute::Login)
            );
        }
    }

    #[test]
    fn wrong_role_redirects_to_login() {
        let (_, session) = store();
        session.save(&Session::new("tok", Role::Student, None)).unwrap();
        assert_eq!(
            check(AppRoute::Admin, &session),
            GuardDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(check(AppRoute::Student, &session), GuardDecision::Allow);
    }

    #[test]
    fn role_without_token_is_not_enough() {
        let (memory, session) = store();
        memory.set(STORAGE_ROLE_KEY, "admin");
        assert_eq!(
            check(AppRoute::Admin, &session),
            GuardDecision::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn public_routes_are_always_allowed() {
        let (_, session) = store();
        assert_eq!(check(AppRoute::Login, &session), GuardDecision::Allow);
        assert_eq!(check(AppRoute::NotFound, &session), GuardDecision::Allow);
    }

    #[test]
    fn decisions_follow_storage_changes_between_checks() {
        let (memory, session) = store();
        session.save(&Session::new("tok", Role::Admin, None)).unwrap();
        assert_eq!(check(AppRoute::Admin, &session), GuardDecision::Allow);

        memory.delete(STORAGE_TOKEN_KEY);
        assert_eq!(
            check(AppRoute::Admin, &session).resolve(AppRoute::Admin),
            AppRoute::Login
        );
    }
}
