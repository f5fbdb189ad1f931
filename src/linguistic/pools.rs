//! 各 act 的措辞变体池
//!
//! 每个变体是 (结构标签, 文本)；结构标签只用于多样性追踪，不会出现在输出里。

use crate::core::Role;

/// (结构标签, 文本)
pub type Variant = (&'static str, &'static str);

/// 固定模式下的角色澄清文本
pub const FIXED_ROLE_CLARIFICATION: &str = "Please confirm your role once: Student or Teacher.";
pub const FIXED_ROLE_CLARIFICATION_FOLLOW_UP: &str =
    "Once your role is set, I will tailor tone and feedback format.";

/// 响应文本重复时追加的尾句，使用 `uniqueness_tail` 槽位记录结构标签
pub const UNIQUENESS_TAILS: &[Variant] = &[
    ("continue_a", " I am ready for the next step."),
    ("continue_b", " Share the next detail when ready."),
    ("continue_c", " We can continue from here."),
    ("continue_d", " I can proceed as soon as you are ready."),
];

pub const ROLE_CLARIFICATION: &[Variant] = &[
    ("direct_prompt", "Please confirm your role once: Student or Teacher."),
    ("choice_prompt", "Before we continue, please confirm your role: Student or Teacher."),
    ("readiness_prompt", "To tailor responses correctly, please choose your role: Student or Teacher."),
    ("setup_prompt", "Quick setup: are you working as a Student or a Teacher?"),
];

pub const ROLE_CLARIFICATION_FOLLOW_UP: &[Variant] = &[
    ("tailor_tone", "Once your role is set, I will tailor tone and feedback format."),
    ("tailor_style", "After role confirmation, I will adapt language and response style accordingly."),
    ("tailor_perspective", "As soon as your role is confirmed, I will adjust perspective and guidance format."),
    ("tailor_scope", "Confirming role lets me align response framing to your context."),
];

pub fn greeting(role: Role) -> &'static [Variant] {
    match role {
        Role::Teacher => &[
            ("welcome_professional", "Welcome."),
            ("steady_intro", "Good to see you."),
            ("supportive_open", "Hello."),
            ("ready_open", "Thanks for joining."),
        ],
        Role::Student => &[
            ("warm_open", "Hi there."),
            ("friendly_open", "Hello."),
            ("steady_open", "Good to see you."),
            ("ready_open", "Hi."),
        ],
        Role::Unknown => &[
            ("neutral_open", "Hello."),
            ("calm_open", "Welcome."),
            ("supportive_open", "Hi there."),
            ("ready_open", "Good to have you here."),
        ],
    }
}

pub fn readiness(role: Role) -> &'static [Variant] {
    match role {
        Role::Teacher => &[
            ("upload_first", "Share student work or a target skill, and I will return focused feedback."),
            ("analysis_first", "Upload an artifact or describe the objective, and I will provide analysis."),
            ("path_forward", "Provide the task context or upload work, and I will guide the next step."),
            ("direct_support", "Send the work sample when ready, and I will help structure the response plan."),
        ],
        Role::Student => &[
            ("upload_first", "Upload your work or ask for practice, and I will help you move forward."),
            ("practice_first", "Share what you are working on, and we can review it together."),
            ("calm_support", "When you are ready, send your work and I will guide the next step."),
            ("direct_support", "Type your question or upload your work, and I will help from there."),
        ],
        Role::Unknown => &[
            ("neutral_path", "Share your goal or upload work, and I will suggest the next step."),
            ("exploratory_path", "You can start with a question or send a file for analysis."),
            ("guided_path", "Type what you need help with, or upload work to review."),
            ("ready_path", "Start with a prompt or an upload, and I will take it from there."),
        ],
    }
}

pub fn analysis_transition_upload(role: Role) -> &'static [Variant] {
    match role {
        Role::Teacher => &[
            ("upload_received", "Upload received. Preparing focused diagnostic feedback."),
            ("artifact_received", "Work artifact received. Starting analysis now."),
            ("submission_ack", "Submission received. Reviewing for instructional next steps."),
            ("review_start", "File received. Beginning targeted review."),
        ],
        Role::Student => &[
            ("upload_received", "Got your upload. I am reviewing it now."),
            ("artifact_received", "File received. Starting your analysis now."),
            ("submission_ack", "Your work is in. I will break down what to improve."),
            ("review_start", "Upload received. Let us review it step by step."),
        ],
        Role::Unknown => &[
            ("upload_received", "Upload received. Running analysis now."),
            ("artifact_received", "File received. Preparing a focused review."),
            ("submission_ack", "Work sample received. Starting evaluation."),
            ("review_start", "Upload is in. Building feedback now."),
        ],
    }
}

pub fn analysis_transition_text(role: Role) -> &'static [Variant] {
    match role {
        Role::Teacher => &[
            ("text_review_start", "Understood. Building analysis from the current details."),
            ("text_ack", "Acknowledged. Preparing a focused review."),
            ("text_transition", "Noted. Starting diagnostic analysis now."),
            ("text_support", "Request received. I will return structured feedback."),
        ],
        Role::Student => &[
            ("text_review_start", "Understood. I am building your feedback now."),
            ("text_ack", "Got it. I will analyze this and guide your next step."),
            ("text_transition", "Thanks for sharing that. I am preparing your review."),
            ("text_support", "I hear you. Let us turn this into focused feedback."),
        ],
        Role::Unknown => &[
            ("text_review_start", "Understood. I am preparing a focused analysis."),
            ("text_ack", "Acknowledged. I will review this now."),
            ("text_transition", "Got it. I am building feedback from your request."),
            ("text_support", "Request received. Starting analysis now."),
        ],
    }
}

pub fn question_transition(role: Role) -> &'static [Variant] {
    match role {
        Role::Teacher => &[
            ("set_intro", "Building a focused practice set now."),
            ("set_transition", "Preparing questions aligned to observed gaps."),
            ("set_start", "Question set generation is in progress."),
            ("set_ack", "Understood. Generating targeted prompts for instruction."),
        ],
        Role::Student => &[
            ("set_intro", "Great. I am generating focused practice now."),
            ("set_transition", "Let us build questions matched to your current gaps."),
            ("set_start", "Working on a targeted practice set for you now."),
            ("set_ack", "Understood. I will generate questions you can use right away."),
        ],
        Role::Unknown => &[
            ("set_intro", "Preparing a focused practice set now."),
            ("set_transition", "Generating questions aligned to this request."),
            ("set_start", "Question generation is underway."),
            ("set_ack", "Understood. Building a targeted question set."),
        ],
    }
}

pub fn conversation_confirmation(role: Role) -> &'static [Variant] {
    match role {
        Role::Teacher => &[
            ("confirm_professional", "Understood."),
            ("confirm_calm", "Noted."),
            ("confirm_ready", "Acknowledged."),
            ("confirm_support", "Request received."),
        ],
        Role::Student => &[
            ("confirm_warm", "Got it."),
            ("confirm_calm", "Understood."),
            ("confirm_ready", "I hear you."),
            ("confirm_support", "Thanks for sharing that."),
        ],
        Role::Unknown => &[
            ("confirm_neutral", "Understood."),
            ("confirm_calm", "Got it."),
            ("confirm_ready", "Acknowledged."),
            ("confirm_support", "Thanks for sharing."),
        ],
    }
}

pub fn analysis_follow_up(role: Role) -> &'static [Variant] {
    match role {
        Role::Teacher => &[
            ("analysis_followup_a", "Upload the next attempt when ready, and I will compare progress."),
            ("analysis_followup_b", "Share the next draft when available, and I will track change over time."),
            ("analysis_followup_c", "When the student revises, upload the new attempt and I will compare outcomes."),
            ("analysis_followup_d", "Please upload the follow-up attempt, and I will provide a progress comparison."),
        ],
        Role::Student => &[
            ("analysis_followup_a", "Upload your next attempt when ready, and I will compare your progress."),
            ("analysis_followup_b", "Try a revision and upload it, then I will review what improved."),
            ("analysis_followup_c", "When you are ready, send your next version and I will compare it for you."),
            ("analysis_followup_d", "Upload your follow-up attempt and I will help you track improvement."),
        ],
        Role::Unknown => &[
            ("analysis_followup_a", "Upload the next attempt when ready, and I will compare progress."),
            ("analysis_followup_b", "Share a revised version next, and I will provide a comparison."),
            ("analysis_followup_c", "Send the follow-up attempt when available, and I will track the change."),
            ("analysis_followup_d", "Upload the next draft and I will compare the results."),
        ],
    }
}

pub fn question_follow_up(role: Role) -> &'static [Variant] {
    match role {
        Role::Teacher => &[
            ("q_followup_a", "Have the student attempt these, then upload responses for feedback."),
            ("q_followup_b", "Ask the student to complete these and upload the work for review."),
            ("q_followup_c", "Once attempted, upload student responses and I will provide targeted feedback."),
            ("q_followup_d", "Please upload completed responses next, and I will assess the outcomes."),
        ],
        Role::Student => &[
            ("q_followup_a", "Try these questions first, then upload your responses for feedback."),
            ("q_followup_b", "Complete these and share your work, and I will review it."),
            ("q_followup_c", "Work through these questions, then upload your answers for analysis."),
            ("q_followup_d", "When finished, upload your responses and I will guide the next step."),
        ],
        Role::Unknown => &[
            ("q_followup_a", "Attempt these questions first, then upload responses for feedback."),
            ("q_followup_b", "Complete the set and upload the results for review."),
            ("q_followup_c", "Try these questions, then share responses for analysis."),
            ("q_followup_d", "When ready, upload responses and I will provide feedback."),
        ],
    }
}
