//! 内容协作方：薄弱点抽取、出题、书写反馈、回复正文合成
//!
//! 编排器只通过 [`ContentProvider`] 调用这些能力；[`TemplateContent`] 是基于固定模板的默认实现。

pub mod gaps;
pub mod handwriting;
pub mod synthesis;

use crate::core::Role;
use crate::gateway::HandwritingFeedback;

/// 内容协作方接口
pub trait ContentProvider: Send + Sync {
    /// 从消息中抽取至多 3 个非空薄弱点
    fn extract_learning_gaps(&self, message: &str) -> Vec<String>;

    /// 根据薄弱点生成恰好 3 道题
    fn generate_questions(&self, gaps: &[String]) -> Vec<String>;

    fn evaluate_handwriting(&self, has_upload: bool, has_pdf: bool) -> HandwritingFeedback;

    fn compose_analysis_text(&self, role: Role, gaps: &[String]) -> String;

    fn compose_question_prompt(&self, role: Role, questions: &[String]) -> String;

    fn compose_conversational_text(&self, role: Role, message: &str) -> String;
}

/// 固定模板实现
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateContent;

impl ContentProvider for TemplateContent {
    fn extract_learning_gaps(&self, message: &str) -> Vec<String> {
        gaps::extract_learning_gaps(message)
    }

    fn generate_questions(&self, gaps: &[String]) -> Vec<String> {
        gaps::generate_questions(gaps)
    }

    fn evaluate_handwriting(&self, has_upload: bool, has_pdf: bool) -> HandwritingFeedback {
        handwriting::evaluate_handwriting(has_upload, has_pdf)
    }

    fn compose_analysis_text(&self, role: Role, gaps: &[String]) -> String {
        synthesis::analysis_text(role, gaps)
    }

    fn compose_question_prompt(&self, role: Role, questions: &[String]) -> String {
        synthesis::question_prompt(role, questions)
    }

    fn compose_conversational_text(&self, role: Role, message: &str) -> String {
        synthesis::conversational_text(role, message)
    }
}
