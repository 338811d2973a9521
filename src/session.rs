//! 会话模块
//!
//! 封装令牌与用户资料的读写，所有页面通过这里判断登录状态，
//! 不直接访问存储。

use crate::storage::KeyValueStore;
use villa_shared::{Session, SessionUser, STORAGE_SPLASH_KEY, STORAGE_TOKEN_KEY, STORAGE_USER_KEY};

/// 令牌是否有效：非空且不是字符串 "null"
pub fn is_valid_token(token: &str) -> bool {
    let token = token.trim();
    !token.is_empty() && token != "null"
}

#[derive(Clone)]
pub struct SessionService<S> {
    store: S,
}

impl<S: KeyValueStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 当前有效令牌
    pub fn token(&self) -> Option<String> {
        self.store
            .get(STORAGE_TOKEN_KEY)
            .filter(|t| is_valid_token(t))
    }

    /// 缓存的用户资料，损坏的 JSON 视为不存在
    pub fn user(&self) -> Option<SessionUser> {
        let raw = self.store.get(STORAGE_USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.user().is_some_and(|u| u.is_admin())
    }

    pub fn current(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user: self.user()?,
        })
    }

    /// 登录成功后保存会话
    ///
    /// 令牌无效时不写入，返回 false
    pub fn sign_in(&self, session: &Session) -> bool {
        if !is_valid_token(&session.token) {
            log_warn!("[Session] Refusing to store an empty token");
            return false;
        }
        let user = match serde_json::to_string(&session.user) {
            Ok(user) => user,
            Err(e) => {
                log_error!("[Session] Failed to encode user: {}", e);
                return false;
            }
        };
        self.store.set(STORAGE_TOKEN_KEY, &session.token) && self.store.set(STORAGE_USER_KEY, &user)
    }

    /// 注销或鉴权失败时清除会话
    pub fn sign_out(&self) {
        self.store.delete(STORAGE_TOKEN_KEY);
        self.store.delete(STORAGE_USER_KEY);
    }

    pub fn has_seen_splash(&self) -> bool {
        self.store.get(STORAGE_SPLASH_KEY).is_some_and(|v| v == "true")
    }

    pub fn mark_splash_seen(&self) {
        self.store.set(STORAGE_SPLASH_KEY, "true");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use villa_shared::UserType;

    pub(crate) fn sample_session(user_type: UserType) -> Session {
        Session {
            token: "jwt-token".into(),
            user: SessionUser {
                id: "u1".into(),
                first_name: "Ana".into(),
                last_name: "Silva".into(),
                email: "ana@example.com".into(),
                user_type,
            },
        }
    }

    #[test]
    fn test_token_validity() {
        assert!(is_valid_token("abc"));
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("   "));
        assert!(!is_valid_token("null"));
    }

    #[test]
    fn test_literal_null_token_is_unauthenticated() {
        let store = MemoryStore::new();
        store.set(STORAGE_TOKEN_KEY, "null");
        let session = SessionService::new(store);
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_sign_in_and_out() {
        let store = MemoryStore::new();
        let session = SessionService::new(store.clone());

        assert!(session.sign_in(&sample_session(UserType::Admin)));
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert_eq!(session.user().unwrap().email, "ana@example.com");

        session.sign_out();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(store.get(STORAGE_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_sign_in_rejects_empty_token() {
        let session = SessionService::new(MemoryStore::new());
        let mut s = sample_session(UserType::Customer);
        s.token = String::new();
        assert!(!session.sign_in(&s));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_corrupt_user_reads_as_none() {
        let store = MemoryStore::new();
        store.set(STORAGE_TOKEN_KEY, "t");
        store.set(STORAGE_USER_KEY, "{not json");
        let session = SessionService::new(store);
        assert!(session.is_authenticated());
        assert!(session.user().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_splash_flag_persists() {
        let store = MemoryStore::new();
        let session = SessionService::new(store.clone());
        assert!(!session.has_seen_splash());
        session.mark_splash_seen();
        assert!(SessionService::new(store).has_seen_splash());
    }
}
