//! 意图识别模块
//!
//! 纯规则匹配：上传文件优先判定为分析，其次按子串命中出题提示词、分析提示词。

use serde::{Deserialize, Serialize};

/// 识别出的意图类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// 作业/作品分析
    Analysis,
    /// 生成练习题
    QuestionGeneration,
    /// 普通对话
    Conversational,
}

/// 出题提示词（先于分析提示词检查）
const QUESTION_HINTS: &[&str] = &[
    "question",
    "questions",
    "practice",
    "worksheet",
    "generate",
    "quiz",
];

const ANALYSIS_HINTS: &[&str] = &[
    "analyze",
    "analysis",
    "review",
    "feedback",
    "check",
    "evaluate",
    "marking",
];

/// 意图识别器
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 识别用户意图；匹配的是子串而不是分词，"rechecking" 也会命中 "check"
    pub fn classify(&self, message: &str, has_uploads: bool) -> Intent {
        if has_uploads {
            return Intent::Analysis;
        }

        let input_lower = message.trim().to_lowercase();

        if QUESTION_HINTS.iter().any(|hint| input_lower.contains(hint)) {
            return Intent::QuestionGeneration;
        }

        if ANALYSIS_HINTS.iter().any(|hint| input_lower.contains(hint)) {
            return Intent::Analysis;
        }

        Intent::Conversational
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_request_is_question_generation() {
        let classifier = IntentClassifier::new();
        assert_eq!(
            classifier.classify("Can I get practice questions on fractions?", false),
            Intent::QuestionGeneration
        );
    }

    #[test]
    fn test_uploads_dominate_text() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("Please review this", true), Intent::Analysis);
        assert_eq!(classifier.classify("generate a quiz", true), Intent::Analysis);
        assert_eq!(classifier.classify("", true), Intent::Analysis);
    }

    #[test]
    fn test_greeting_is_conversational() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("hello", false), Intent::Conversational);
        assert_eq!(classifier.classify("", false), Intent::Conversational);
    }

    #[test]
    fn test_question_hints_win_over_analysis_hints() {
        let classifier = IntentClassifier::new();
        assert_eq!(
            classifier.classify("Review my work and generate a worksheet", false),
            Intent::QuestionGeneration
        );
    }

    #[test]
    fn test_analysis_hint_and_substring_match() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("  Please EVALUATE my essay ", false), Intent::Analysis);
        assert_eq!(classifier.classify("I was rechecking it", false), Intent::Analysis);
    }

    #[test]
    fn test_intent_wire_format() {
        assert_eq!(
            serde_json::to_string(&Intent::QuestionGeneration).unwrap(),
            "\"QUESTION_GENERATION\""
        );
    }
}
