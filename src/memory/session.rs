//! 单个会话的记忆状态
//!
//! 角色、澄清标记、对话轮次（滑动窗口）、学习薄弱点、近期已输出措辞、各 act 上次使用的结构标签。
//! 每个会话键都由 [`SessionState::new`] 生成一份独立的状态，不共享默认容器。

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Role;

/// 对话轮次上限，超出时丢弃最旧的
pub const MAX_TURNS: usize = 40;
/// 近期措辞窗口大小（跨 act 的防重复检查）
pub const MAX_RECENT_PHRASES: usize = 30;
/// 学习薄弱点上限
pub const MAX_LEARNING_GAPS: usize = 5;

/// 发言方
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// 一条对话记录
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// 会话记忆
#[derive(Clone, Debug)]
pub struct SessionState {
    pub role: Role,
    /// 只会从 false 变为 true，只能经由 mark_role_clarification_asked 修改
    asked_role_clarification: bool,
    turns: Vec<Turn>,
    learning_gaps: Vec<String>,
    recent_phrases: Vec<String>,
    last_structure_by_act: HashMap<String, String>,
    last_active: Instant,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            role: Role::Unknown,
            asked_role_clarification: false,
            turns: Vec::new(),
            learning_gaps: Vec::new(),
            recent_phrases: Vec::new(),
            last_structure_by_act: HashMap::new(),
            last_active: Instant::now(),
        }
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn asked_role_clarification(&self) -> bool {
        self.asked_role_clarification
    }

    /// 标记已发出角色澄清；返回本次调用是否首次标记
    pub fn mark_role_clarification_asked(&mut self) -> bool {
        let first = !self.asked_role_clarification;
        self.asked_role_clarification = true;
        first
    }

    /// 整体替换薄弱点：过滤空串、截断到 5 个；同一次写入内的重复项保留
    pub fn remember_gaps<I, S>(&mut self, gaps: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.learning_gaps = gaps
            .into_iter()
            .map(Into::into)
            .filter(|g| !g.is_empty())
            .take(MAX_LEARNING_GAPS)
            .collect();
    }

    pub fn learning_gaps(&self) -> &[String] {
        &self.learning_gaps
    }

    pub fn append_turn(&mut self, speaker: Speaker, content: impl Into<String>) {
        self.turns.push(Turn {
            speaker,
            content: content.into(),
            timestamp: Utc::now(),
        });
        if self.turns.len() > MAX_TURNS {
            let excess = self.turns.len() - MAX_TURNS;
            self.turns.drain(..excess);
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// 记录一条已输出的措辞（去首尾空白，空串忽略）
    pub fn remember_phrase(&mut self, phrase: &str) {
        let clean = phrase.trim();
        if clean.is_empty() {
            return;
        }
        self.recent_phrases.push(clean.to_string());
        if self.recent_phrases.len() > MAX_RECENT_PHRASES {
            let excess = self.recent_phrases.len() - MAX_RECENT_PHRASES;
            self.recent_phrases.drain(..excess);
        }
    }

    pub fn recent_phrases(&self) -> &[String] {
        &self.recent_phrases
    }

    pub fn has_recent_phrase(&self, text: &str) -> bool {
        self.recent_phrases.iter().any(|p| p == text)
    }

    pub fn last_structure(&self, act: &str) -> Option<&str> {
        self.last_structure_by_act.get(act).map(String::as_str)
    }

    pub fn set_last_structure(&mut self, act: &str, structure: &str) {
        self.last_structure_by_act
            .insert(act.to_string(), structure.to_string());
    }

    pub(crate) fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_active.elapsed() > timeout
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_are_bounded() {
        let mut state = SessionState::new();
        for i in 0..100 {
            state.append_turn(Speaker::User, format!("turn {}", i));
        }
        assert_eq!(state.turns().len(), MAX_TURNS);
        assert_eq!(state.turns()[0].content, "turn 60");
        assert_eq!(state.turns()[MAX_TURNS - 1].content, "turn 99");
    }

    #[test]
    fn test_recent_phrases_are_bounded_and_trimmed() {
        let mut state = SessionState::new();
        state.remember_phrase("   ");
        assert!(state.recent_phrases().is_empty());

        for i in 0..45 {
            state.remember_phrase(&format!("  phrase {}  ", i));
        }
        assert_eq!(state.recent_phrases().len(), MAX_RECENT_PHRASES);
        assert_eq!(state.recent_phrases()[0], "phrase 15");
        assert!(state.has_recent_phrase("phrase 44"));
    }

    // 已知行为：同一次写入内的重复薄弱点不去重，只过滤空串
    #[test]
    fn test_remember_gaps_keeps_duplicates() {
        let mut state = SessionState::new();
        state.remember_gaps(["fractions", "fractions", "", "algebra"]);
        assert_eq!(state.learning_gaps(), ["fractions", "fractions", "algebra"]);
    }

    #[test]
    fn test_remember_gaps_replaces_and_caps() {
        let mut state = SessionState::new();
        state.remember_gaps(["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(state.learning_gaps().len(), MAX_LEARNING_GAPS);

        state.remember_gaps(["geometry"]);
        assert_eq!(state.learning_gaps(), ["geometry"]);
    }

    #[test]
    fn test_clarification_flag_is_monotonic() {
        let mut state = SessionState::new();
        assert!(state.mark_role_clarification_asked());
        assert!(!state.mark_role_clarification_asked());
        assert!(state.asked_role_clarification());
    }

    #[test]
    fn test_turn_serializes_with_timestamp() {
        let mut state = SessionState::new();
        state.append_turn(Speaker::Assistant, "Hello.");

        let json = serde_json::to_value(&state.turns()[0]).unwrap();
        assert!(json["timestamp"].is_string());

        let turn: Turn = serde_json::from_value(json).unwrap();
        assert_eq!(turn.speaker, Speaker::Assistant);
        assert_eq!(turn.content, "Hello.");
        assert_eq!(turn.timestamp, state.turns()[0].timestamp);
    }
}
