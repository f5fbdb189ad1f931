//! 用户角色与角色解析

use serde::{Deserialize, Serialize};

use crate::memory::SessionState;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Teacher,
    Student,
    Unknown,
}

impl Role {
    /// act 名称中使用的小写后缀（greeting_teacher 等）
    pub fn as_key(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown)
    }
}

/// 解析本轮角色：请求显式给出的角色写入会话并覆盖旧值；否则沿用会话里已知的角色
pub fn resolve_role(hint: Role, state: &mut SessionState) -> Role {
    if hint.is_known() {
        state.set_role(hint);
        return hint;
    }
    if state.role.is_known() {
        return state.role;
    }
    Role::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_role_is_persisted() {
        let mut state = SessionState::new();
        assert_eq!(resolve_role(Role::Student, &mut state), Role::Student);
        assert_eq!(state.role, Role::Student);
    }

    #[test]
    fn test_unknown_hint_falls_back_to_stored_role() {
        let mut state = SessionState::new();
        resolve_role(Role::Teacher, &mut state);
        assert_eq!(resolve_role(Role::Unknown, &mut state), Role::Teacher);
    }

    #[test]
    fn test_explicit_role_overrides_stored_role() {
        let mut state = SessionState::new();
        resolve_role(Role::Teacher, &mut state);
        assert_eq!(resolve_role(Role::Student, &mut state), Role::Student);
        assert_eq!(state.role, Role::Student);
    }

    #[test]
    fn test_unknown_everywhere_stays_unknown() {
        let mut state = SessionState::new();
        assert_eq!(resolve_role(Role::Unknown, &mut state), Role::Unknown);
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"TEACHER\"");
        let role: Role = serde_json::from_str("\"UNKNOWN\"").unwrap();
        assert_eq!(role, Role::Unknown);
    }
}
