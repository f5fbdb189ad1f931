//! 回复正文合成（按角色区分措辞视角）

use crate::core::Role;

pub fn analysis_text(role: Role, gaps: &[String]) -> String {
    let subject_focus = if gaps.is_empty() {
        "core concepts in this submission".to_string()
    } else {
        gaps.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
    };

    match role {
        Role::Teacher => format!(
            "The student shows partial understanding in {}. \
             Reasoning steps are present, but there are consistency gaps in execution. \
             Targeted reteaching with one worked example and one independent check should improve retention.",
            subject_focus
        ),
        Role::Student => format!(
            "You show partial understanding in {}. \
             Your reasoning steps are visible, and a few checkpoints need tighter consistency. \
             One guided example followed by one independent retry will strengthen this skill.",
            subject_focus
        ),
        Role::Unknown => format!(
            "This work shows partial understanding in {}. \
             Reasoning is visible with a few consistency gaps that can be addressed through guided practice.",
            subject_focus
        ),
    }
}

pub fn question_prompt(role: Role, questions: &[String]) -> String {
    let joined = questions
        .iter()
        .enumerate()
        .map(|(idx, q)| format!("{}. {}", idx + 1, q))
        .collect::<Vec<_>>()
        .join("\n");

    let (intro, outro) = match role {
        Role::Teacher => (
            "Generated practice set aligned to observed gaps:",
            "Please ask the student to attempt these and upload the response for feedback.",
        ),
        Role::Student => (
            "Here are focused practice questions linked to your current gaps:",
            "Try these first, then upload your work and I will review it.",
        ),
        Role::Unknown => (
            "Here are focused practice questions linked to this conversation:",
            "Attempt them and upload the results for feedback.",
        ),
    };
    format!("{}\n{}\n{}", intro, joined, outro)
}

pub fn conversational_text(role: Role, message: &str) -> String {
    if message.trim().is_empty() {
        return match role {
            Role::Teacher => {
                "Please share the student task or upload work, and I will provide targeted feedback."
            }
            _ => "Share your question or upload your work, and I will guide the next step.",
        }
        .to_string();
    }

    match role {
        Role::Teacher => "The request is understood. Please share the student work artifact or target skill, \
             and I will return analysis or question generation aligned to that need."
            .to_string(),
        _ => "I can help with feedback or guided practice. Share your work or ask for focused questions on a topic."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_uses_first_two_gaps() {
        let gaps = vec!["fractions".to_string(), "algebra".to_string(), "geometry".to_string()];
        let text = analysis_text(Role::Student, &gaps);
        assert!(text.starts_with("You show partial understanding in fractions, algebra."));
        assert!(!text.contains("geometry"));
    }

    #[test]
    fn test_analysis_without_gaps() {
        let text = analysis_text(Role::Teacher, &[]);
        assert!(text.contains("core concepts in this submission"));
        assert!(text.starts_with("The student"));
    }

    #[test]
    fn test_question_prompt_is_numbered() {
        let qs = vec!["A?".to_string(), "B?".to_string(), "C?".to_string()];
        let text = question_prompt(Role::Unknown, &qs);
        assert!(text.contains("1. A?\n2. B?\n3. C?"));
    }

    #[test]
    fn test_empty_conversational_message() {
        assert!(conversational_text(Role::Teacher, "  ").starts_with("Please share the student task"));
        assert!(conversational_text(Role::Student, "").starts_with("Share your question"));
    }
}
