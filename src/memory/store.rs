//! 会话存储
//!
//! 进程内的会话表：外层 RwLock 只在查找/插入时持有，每个会话各自一把 Mutex，
//! 不同会话可以并行处理，同一会话的轮次串行执行。

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError,
};
use std::time::Duration;

use super::session::{SessionState, Speaker};
use crate::core::Role;

/// 会话 ID
pub type SessionId = String;

/// 会话存储（由编排器持有，而非全局状态）
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<SessionState>>>>,
    /// 空闲超时；为 None 时会话永不过期
    idle_timeout: Option<Duration>,
}

impl SessionStore {
    /// `idle_timeout_secs` 为 0 时关闭过期清理
    pub fn new(idle_timeout_secs: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout: (idle_timeout_secs > 0).then(|| Duration::from_secs(idle_timeout_secs)),
        }
    }

    /// 读表锁；锁被毒化时直接取回内部数据（会话表本身没有跨字段不变量）
    fn table(&self) -> RwLockReadGuard<'_, HashMap<SessionId, Arc<Mutex<SessionState>>>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn table_mut(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, Arc<Mutex<SessionState>>>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, session_id: &str) -> Arc<Mutex<SessionState>> {
        if let Some(handle) = self.table().get(session_id) {
            return Arc::clone(handle);
        }

        let mut sessions = self.table_mut();
        let handle = sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::info!(session_id, "Creating session state");
            Arc::new(Mutex::new(SessionState::new()))
        });
        Arc::clone(handle)
    }

    /// 获取会话（不存在则创建）并在持有该会话锁期间执行 f
    ///
    /// 之前某一轮在持锁时 panic，只终止那一轮：会话保留已写入的部分状态，继续可用。
    pub fn with_session<F, R>(&self, session_id: &str, f: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let handle = self.handle(session_id);
        let mut state = handle.lock().unwrap_or_else(|poisoned| {
            tracing::warn!(session_id, "Recovering session state after a panicked turn");
            handle.clear_poison();
            poisoned.into_inner()
        });
        state.touch();
        f(&mut state)
    }

    pub fn set_role(&self, session_id: &str, role: Role) {
        self.with_session(session_id, |s| s.set_role(role))
    }

    pub fn remember_gaps(&self, session_id: &str, gaps: &[String]) {
        self.with_session(session_id, |s| s.remember_gaps(gaps.iter().cloned()))
    }

    pub fn append_turn(&self, session_id: &str, speaker: Speaker, content: &str) {
        self.with_session(session_id, |s| s.append_turn(speaker, content))
    }

    pub fn remember_phrase(&self, session_id: &str, phrase: &str) {
        self.with_session(session_id, |s| s.remember_phrase(phrase))
    }

    /// 会话状态快照（不会创建会话）
    pub fn snapshot(&self, session_id: &str) -> Option<SessionState> {
        let handle = self.table().get(session_id).cloned()?;
        let state = handle.lock().unwrap_or_else(PoisonError::into_inner);
        Some(state.clone())
    }

    /// 清理空闲超时的会话，返回清理数量
    pub fn cleanup_expired(&self) -> usize {
        let Some(timeout) = self.idle_timeout else {
            return 0;
        };
        let mut sessions = self.table_mut();

        let before = sessions.len();
        // 正在处理中的会话（锁被占用）不算空闲；被毒化的会话按其最后活跃时间判断
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(state) => !state.is_expired(timeout),
            Err(TryLockError::Poisoned(poisoned)) => !poisoned.into_inner().is_expired(timeout),
            Err(TryLockError::WouldBlock) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, "Expired idle sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::session::{MAX_RECENT_PHRASES, MAX_TURNS};

    #[test]
    fn test_get_creates_lazily() {
        let store = SessionStore::new(0);
        assert!(store.snapshot("s1").is_none());

        let role = store.with_session("s1", |s| s.role);
        assert_eq!(role, Role::Unknown);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new(0);
        store.set_role("a", Role::Teacher);
        store.remember_phrase("a", "Hello.");

        let b = store.with_session("b", |s| s.clone());
        assert_eq!(b.role, Role::Unknown);
        assert!(b.recent_phrases().is_empty());
    }

    #[test]
    fn test_store_level_bounds() {
        let store = SessionStore::new(0);
        for i in 0..90 {
            store.append_turn("s", Speaker::User, &format!("m{}", i));
            store.remember_phrase("s", &format!("p{}", i));
        }
        let state = store.snapshot("s").unwrap();
        assert_eq!(state.turns().len(), MAX_TURNS);
        assert_eq!(state.recent_phrases().len(), MAX_RECENT_PHRASES);
    }

    #[test]
    fn test_remember_gaps_through_store() {
        let store = SessionStore::new(0);
        let gaps = vec![
            "fractions".to_string(),
            "fractions".to_string(),
            String::new(),
            "algebra".to_string(),
        ];
        store.remember_gaps("s", &gaps);
        let state = store.snapshot("s").unwrap();
        assert_eq!(state.learning_gaps(), ["fractions", "fractions", "algebra"]);
    }

    #[test]
    fn test_cleanup_disabled_keeps_sessions() {
        let store = SessionStore::new(0);
        store.with_session("s", |_| ());
        assert_eq!(store.cleanup_expired(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_cleanup_removes_idle_sessions() {
        let store = SessionStore::new(1);
        store.with_session("old", |_| ());
        std::thread::sleep(Duration::from_millis(1100));
        store.with_session("fresh", |_| ());

        assert_eq!(store.cleanup_expired(), 1);
        assert!(store.snapshot("old").is_none());
        assert!(store.snapshot("fresh").is_some());
    }

    #[test]
    fn test_panicked_turn_keeps_session_usable() {
        let store = SessionStore::new(1);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.with_session("s", |state| {
                state.remember_gaps(["fractions"]);
                panic!("turn failed halfway");
            })
        }));
        assert!(outcome.is_err());

        // 已写入的部分状态保留，后续轮次照常执行
        let gaps = store.with_session("s", |state| state.learning_gaps().to_vec());
        assert_eq!(gaps, vec!["fractions".to_string()]);
        store.append_turn("s", Speaker::User, "again");
        assert_eq!(store.snapshot("s").unwrap().turns().len(), 1);
    }

    #[test]
    fn test_cleanup_removes_idle_poisoned_session() {
        let store = SessionStore::new(1);
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.with_session("s", |_| panic!("turn failed"))
        }));
        std::thread::sleep(Duration::from_millis(1100));

        assert_eq!(store.cleanup_expired(), 1);
        assert!(store.is_empty());
    }
}
