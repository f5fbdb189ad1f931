//! 措辞变体实现器
//!
//! 在语义固定的前提下改变表层措辞：
//! 1. 优先选「文本不在近期措辞中、结构标签与该 act 上次不同」的变体；
//! 2. 其次只要求文本不重复；
//! 3. 再不行就用整个变体池（池被用尽时容忍完全重复）。
//!
//! 组合出的完整文本若仍与近期输出重复，再追加一个尾句（`ensure_unique`）。
//! 每个实现出的字符串都会立即写入会话的近期措辞，后续选择（同一轮或之后）都能看到。

use std::sync::Arc;

use super::picker::VariantPicker;
use super::pools::{self, Variant};
use crate::core::Role;
use crate::gateway::Intent;
use crate::memory::SessionState;

/// 尾句使用的结构标签槽位
const UNIQUENESS_TAIL_SLOT: &str = "uniqueness_tail";

const GREETING_TOKENS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];

/// 是否为单纯的问候语：完全等于问候词，或以「问候词 + 空格」开头
pub fn is_greeting_message(text: &str) -> bool {
    let clean = text.trim().to_lowercase();
    if clean.is_empty() {
        return false;
    }
    GREETING_TOKENS.iter().any(|token| {
        clean == *token
            || clean
                .strip_prefix(*token)
                .is_some_and(|rest| rest.starts_with(' '))
    })
}

/// 一次渲染的输入
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub role: Role,
    pub intent: Intent,
    pub user_text: &'a str,
    pub has_upload: bool,
    pub base_text: &'a str,
    pub base_follow_up: Option<&'a str>,
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub response_text: String,
    pub follow_up: Option<String>,
}

/// 措辞变体实现器
#[derive(Clone)]
pub struct LinguisticRealizer {
    picker: Arc<dyn VariantPicker>,
}

impl LinguisticRealizer {
    pub fn new(picker: Arc<dyn VariantPicker>) -> Self {
        Self { picker }
    }

    /// 为某个 act 选出一条文本，并记录其结构标签
    pub fn pick_variant(&self, state: &mut SessionState, act: &str, options: &[Variant]) -> String {
        debug_assert!(!options.is_empty(), "variant pool for {} is empty", act);

        let last_structure = state.last_structure(act).map(str::to_string);

        let mut candidates: Vec<&Variant> = options
            .iter()
            .filter(|(structure, text)| {
                !state.has_recent_phrase(text) && Some(*structure) != last_structure.as_deref()
            })
            .collect();
        if candidates.is_empty() {
            candidates = options
                .iter()
                .filter(|(_, text)| !state.has_recent_phrase(text))
                .collect();
        }
        if candidates.is_empty() {
            tracing::debug!(act, "Variant pool exhausted, allowing repetition");
            candidates = options.iter().collect();
        }

        let idx = self
            .picker
            .pick_index(candidates.len())
            .min(candidates.len().saturating_sub(1));
        let &(structure, text) = candidates[idx];
        state.set_last_structure(act, structure);
        tracing::debug!(act, structure, "Picked variant");
        text.to_string()
    }

    /// 若文本已在近期措辞中，追加一个尾句；尾句全部不可用时原样返回
    pub fn ensure_unique(&self, state: &mut SessionState, text: String) -> String {
        if !state.has_recent_phrase(&text) {
            return text;
        }

        for (structure, tail) in pools::UNIQUENESS_TAILS {
            let candidate = format!("{}{}", text, tail);
            if !state.has_recent_phrase(&candidate)
                && state.last_structure(UNIQUENESS_TAIL_SLOT) != Some(*structure)
            {
                state.set_last_structure(UNIQUENESS_TAIL_SLOT, structure);
                return candidate;
            }
        }
        text
    }

    fn realize_and_remember(&self, state: &mut SessionState, act: &str, options: &[Variant]) -> String {
        let text = self.pick_variant(state, act, options);
        let realized = self.ensure_unique(state, text);
        state.remember_phrase(&realized);
        realized
    }

    pub fn role_clarification(&self, state: &mut SessionState) -> String {
        self.realize_and_remember(state, "role_clarification", pools::ROLE_CLARIFICATION)
    }

    pub fn role_clarification_follow_up(&self, state: &mut SessionState) -> String {
        self.realize_and_remember(
            state,
            "role_clarification_followup",
            pools::ROLE_CLARIFICATION_FOLLOW_UP,
        )
    }

    fn follow_up_line(&self, state: &mut SessionState, role: Role, intent: Intent) -> Option<String> {
        let (act, options) = match intent {
            Intent::Analysis => ("followup_analysis", pools::analysis_follow_up(role)),
            Intent::QuestionGeneration => ("followup_question", pools::question_follow_up(role)),
            Intent::Conversational => return None,
        };
        let act = format!("{}_{}", act, role.as_key());
        Some(self.realize_and_remember(state, &act, options))
    }

    /// 组合「过渡语/前缀 + 正文」并保证与近期输出不同
    fn compose(&self, state: &mut SessionState, lead: String, body: &str) -> String {
        let composed = format!("{} {}", lead, body).trim().to_string();
        let realized = self.ensure_unique(state, composed);
        state.remember_phrase(&realized);
        realized
    }

    /// 按意图重新渲染正文与后续建议
    pub fn realize_response(&self, state: &mut SessionState, input: RenderInput<'_>) -> Rendered {
        let role = input.role;
        let key = role.as_key();
        let base_text = input.base_text.trim();

        let response_text = match input.intent {
            Intent::Analysis => {
                let transition = if input.has_upload {
                    self.pick_variant(
                        state,
                        &format!("analysis_transition_upload_{}", key),
                        pools::analysis_transition_upload(role),
                    )
                } else {
                    self.pick_variant(
                        state,
                        &format!("analysis_transition_text_{}", key),
                        pools::analysis_transition_text(role),
                    )
                };
                self.compose(state, transition, base_text)
            }
            Intent::QuestionGeneration => {
                let transition = self.pick_variant(
                    state,
                    &format!("question_transition_{}", key),
                    pools::question_transition(role),
                );
                self.compose(state, transition, base_text)
            }
            Intent::Conversational => {
                if is_greeting_message(input.user_text) && !input.has_upload {
                    let greeting =
                        self.pick_variant(state, &format!("greeting_{}", key), pools::greeting(role));
                    let readiness =
                        self.pick_variant(state, &format!("readiness_{}", key), pools::readiness(role));
                    self.compose(state, greeting, &readiness)
                } else {
                    let confirm = self.pick_variant(
                        state,
                        &format!("conversation_confirm_{}", key),
                        pools::conversation_confirmation(role),
                    );
                    self.compose(state, confirm, base_text)
                }
            }
        };

        let follow_up = match input.intent {
            Intent::Conversational => input.base_follow_up.map(str::to_string),
            _ => self.follow_up_line(state, role, input.intent),
        };

        Rendered {
            response_text,
            follow_up,
        }
    }
}
