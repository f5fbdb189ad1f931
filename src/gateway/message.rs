//! 引擎请求/响应协议定义
//!
//! 与网关之间的 JSON 格式（camelCase 字段名）。

use serde::{Deserialize, Serialize};

use super::intent::Intent;
use crate::core::Role;

/// 上传的文件；核心逻辑只关心是否存在以及 mime 类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub base64_data: String,
}

impl UploadArtifact {
    pub fn is_pdf(&self) -> bool {
        self.mime_type.to_lowercase() == "application/pdf"
    }
}

/// 调用方附带的历史对话（引擎不读取，仅供外部协作方使用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

/// 引擎请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineRequest {
    pub user_id: String,
    pub role: Role,
    pub session_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub uploads: Vec<UploadArtifact>,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

impl EngineRequest {
    /// 构造一个不带上传、不带历史的请求
    pub fn text(role: Role, session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: String::new(),
            role,
            session_id: session_id.into(),
            message: message.into(),
            uploads: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn with_upload(mut self, upload: UploadArtifact) -> Self {
        self.uploads.push(upload);
        self
    }

    pub fn has_uploads(&self) -> bool {
        !self.uploads.is_empty()
    }

    pub fn has_pdf(&self) -> bool {
        self.uploads.iter().any(UploadArtifact::is_pdf)
    }
}

/// 书写质量反馈
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandwritingFeedback {
    pub legibility: String,
    pub line_consistency: String,
    pub character_spacing: String,
    pub meaning_impact: String,
    pub suggestions: Vec<String>,
}

/// 引擎响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineResponse {
    pub session_id: String,
    pub intent: Intent,
    pub role: Role,
    pub response_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handwriting_feedback: Option<HandwritingFeedback>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let raw = r#"{"userId":"u1","role":"STUDENT","sessionId":"s1"}"#;
        let req: EngineRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.role, Role::Student);
        assert!(req.message.is_empty());
        assert!(!req.has_uploads());
    }

    #[test]
    fn test_pdf_detection_is_case_insensitive() {
        let req = EngineRequest::text(Role::Teacher, "s", "").with_upload(UploadArtifact {
            file_name: "work.pdf".into(),
            mime_type: "Application/PDF".into(),
            base64_data: "AAAA".into(),
        });
        assert!(req.has_pdf());
    }

    #[test]
    fn test_response_omits_absent_fields() {
        let resp = EngineResponse {
            session_id: "s".into(),
            intent: Intent::Conversational,
            role: Role::Unknown,
            response_text: "Hello.".into(),
            follow_up_suggestion: None,
            generated_questions: None,
            handwriting_feedback: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["responseText"], "Hello.");
        assert_eq!(json["intent"], "CONVERSATIONAL");
        assert!(json.get("followUpSuggestion").is_none());
        assert!(json.get("handwritingFeedback").is_none());
    }
}
