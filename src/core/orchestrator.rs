//! 对话编排器
//!
//! 每个请求的处理顺序：角色解析 → 意图识别 → 角色澄清闸门 → 按意图调用内容协作方 →
//! （变体模式下）重新渲染措辞 → 记录本轮对话 → 返回响应。
//!
//! 整个处理过程持有该会话的锁，同一会话的请求串行执行。出错时已写入的会话记忆不回滚。

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::content::{ContentProvider, TemplateContent};
use crate::core::{resolve_role, EngineError, Role};
use crate::gateway::{EngineRequest, EngineResponse, Intent, IntentClassifier};
use crate::linguistic::pools::{FIXED_ROLE_CLARIFICATION, FIXED_ROLE_CLARIFICATION_FOLLOW_UP};
use crate::linguistic::{LinguisticRealizer, OsRngPicker, RenderInput, VariantPicker};
use crate::memory::{SessionState, SessionStore, Speaker};

/// 分析类响应的默认后续建议
const ANALYSIS_FOLLOW_UP: &str = "Upload the next attempt when ready, and I will compare progress.";
/// 出题类响应的默认后续建议
const QUESTION_FOLLOW_UP: &str =
    "Attempt these questions first, then upload your responses for feedback.";

const EXPECTED_QUESTION_COUNT: usize = 3;

/// 对话编排器
pub struct Orchestrator {
    store: Arc<SessionStore>,
    config: EngineConfig,
    classifier: IntentClassifier,
    realizer: LinguisticRealizer,
    content: Arc<dyn ContentProvider>,
}

impl Orchestrator {
    pub fn new(
        store: Arc<SessionStore>,
        config: EngineConfig,
        picker: Arc<dyn VariantPicker>,
        content: Arc<dyn ContentProvider>,
    ) -> Self {
        Self {
            store,
            config,
            classifier: IntentClassifier::new(),
            realizer: LinguisticRealizer::new(picker),
            content,
        }
    }

    /// 系统熵源 + 模板内容的默认组合
    pub fn with_defaults(store: Arc<SessionStore>, config: EngineConfig) -> Self {
        Self::new(store, config, Arc::new(OsRngPicker), Arc::new(TemplateContent))
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// 处理一个请求
    pub fn handle(&self, request: &EngineRequest) -> Result<EngineResponse, EngineError> {
        self.store
            .with_session(&request.session_id, |state| self.run_turn(state, request))
    }

    fn run_turn(
        &self,
        state: &mut SessionState,
        request: &EngineRequest,
    ) -> Result<EngineResponse, EngineError> {
        let role = resolve_role(request.role, state);
        let intent = self
            .classifier
            .classify(&request.message, request.has_uploads());

        tracing::debug!(
            session_id = %request.session_id,
            ?role,
            ?intent,
            uploads = request.uploads.len(),
            "Handling engine request"
        );

        if !role.is_known() && state.mark_role_clarification_asked() {
            return Ok(self.clarify_role(state, request, role));
        }

        let response = match intent {
            Intent::Analysis => self.analysis(state, request, role),
            Intent::QuestionGeneration => self.question_generation(state, request, role)?,
            Intent::Conversational => self.conversational(state, request, role),
        };

        record_exchange(state, &request.message, &response.response_text);
        Ok(response)
    }

    /// 角色未知时的一次性澄清；意图强制为 CONVERSATIONAL，本轮不做任何内容处理
    fn clarify_role(
        &self,
        state: &mut SessionState,
        request: &EngineRequest,
        role: Role,
    ) -> EngineResponse {
        let (text, follow_up) = if self.config.linguistic_variation {
            let text = self.realizer.role_clarification(state);
            let follow_up = self.realizer.role_clarification_follow_up(state);
            (text, follow_up)
        } else {
            (
                FIXED_ROLE_CLARIFICATION.to_string(),
                FIXED_ROLE_CLARIFICATION_FOLLOW_UP.to_string(),
            )
        };
        tracing::info!(session_id = %request.session_id, "Asking for role clarification");

        record_exchange(state, &request.message, &text);
        EngineResponse {
            session_id: request.session_id.clone(),
            intent: Intent::Conversational,
            role,
            response_text: text,
            follow_up_suggestion: Some(follow_up),
            generated_questions: None,
            handwriting_feedback: None,
        }
    }

    fn analysis(
        &self,
        state: &mut SessionState,
        request: &EngineRequest,
        role: Role,
    ) -> EngineResponse {
        let gaps = self.content.extract_learning_gaps(&request.message);
        state.remember_gaps(gaps.iter().cloned());

        let feedback = self
            .content
            .evaluate_handwriting(request.has_uploads(), request.has_pdf());
        let base_text = self.content.compose_analysis_text(role, &gaps);
        let (response_text, follow_up) =
            self.render(state, request, role, Intent::Analysis, base_text, Some(ANALYSIS_FOLLOW_UP));

        EngineResponse {
            session_id: request.session_id.clone(),
            intent: Intent::Analysis,
            role,
            response_text,
            follow_up_suggestion: follow_up,
            generated_questions: None,
            handwriting_feedback: Some(feedback),
        }
    }

    fn question_generation(
        &self,
        state: &mut SessionState,
        request: &EngineRequest,
        role: Role,
    ) -> Result<EngineResponse, EngineError> {
        let gaps = if state.learning_gaps().is_empty() {
            self.content.extract_learning_gaps(&request.message)
        } else {
            state.learning_gaps().to_vec()
        };

        let questions = self.content.generate_questions(&gaps);
        if questions.len() != EXPECTED_QUESTION_COUNT {
            return Err(EngineError::InvalidCollaboratorOutput(format!(
                "expected {} questions, got {}",
                EXPECTED_QUESTION_COUNT,
                questions.len()
            )));
        }

        let base_text = self.content.compose_question_prompt(role, &questions);
        let (response_text, follow_up) = self.render(
            state,
            request,
            role,
            Intent::QuestionGeneration,
            base_text,
            Some(QUESTION_FOLLOW_UP),
        );

        Ok(EngineResponse {
            session_id: request.session_id.clone(),
            intent: Intent::QuestionGeneration,
            role,
            response_text,
            follow_up_suggestion: follow_up,
            generated_questions: Some(questions),
            handwriting_feedback: None,
        })
    }

    fn conversational(
        &self,
        state: &mut SessionState,
        request: &EngineRequest,
        role: Role,
    ) -> EngineResponse {
        let base_text = self.content.compose_conversational_text(role, &request.message);
        let (response_text, follow_up) =
            self.render(state, request, role, Intent::Conversational, base_text, None);

        EngineResponse {
            session_id: request.session_id.clone(),
            intent: Intent::Conversational,
            role,
            response_text,
            follow_up_suggestion: follow_up,
            generated_questions: None,
            handwriting_feedback: None,
        }
    }

    /// 固定模式直接返回模板文本；变体模式交给 realizer 重新渲染
    fn render(
        &self,
        state: &mut SessionState,
        request: &EngineRequest,
        role: Role,
        intent: Intent,
        base_text: String,
        base_follow_up: Option<&str>,
    ) -> (String, Option<String>) {
        if !self.config.linguistic_variation {
            return (base_text, base_follow_up.map(str::to_string));
        }

        let rendered = self.realizer.realize_response(
            state,
            RenderInput {
                role,
                intent,
                user_text: &request.message,
                has_upload: request.has_uploads(),
                base_text: &base_text,
                base_follow_up,
            },
        );
        (rendered.response_text, rendered.follow_up)
    }
}

fn record_exchange(state: &mut SessionState, user_text: &str, response_text: &str) {
    state.append_turn(Speaker::User, user_text);
    state.append_turn(Speaker::Assistant, response_text);
}
