//! 书写反馈：无上传 / PDF / 图片三档固定反馈

use crate::gateway::HandwritingFeedback;

fn feedback(
    legibility: &str,
    line_consistency: &str,
    character_spacing: &str,
    meaning_impact: &str,
    suggestions: &[&str],
) -> HandwritingFeedback {
    HandwritingFeedback {
        legibility: legibility.to_string(),
        line_consistency: line_consistency.to_string(),
        character_spacing: character_spacing.to_string(),
        meaning_impact: meaning_impact.to_string(),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn evaluate_handwriting(has_upload: bool, has_pdf: bool) -> HandwritingFeedback {
    if !has_upload {
        return feedback(
            "Not assessed in this response.",
            "Not assessed in this response.",
            "Not assessed in this response.",
            "No handwriting sample was provided.",
            &["Upload one page of student writing to receive handwriting-specific feedback."],
        );
    }

    if has_pdf {
        return feedback(
            "Readable in most sections.",
            "Mostly aligned with occasional baseline shifts.",
            "Spacing is generally clear between words.",
            "The current handwriting quality should not block meaning.",
            &[
                "Keep letter heights consistent in multi-line answers.",
                "Leave a little more space between dense equations and annotations.",
            ],
        );
    }

    feedback(
        "Moderate clarity with a few ambiguous characters.",
        "Lines vary in tilt across the page.",
        "Word spacing is inconsistent in several areas.",
        "Some symbols may be interpreted incorrectly due to spacing and tilt.",
        &[
            "Use a slower first pass to stabilize letter and symbol shapes.",
            "Keep one finger-width between words and between math steps.",
            "Rewrite final answers on a fresh line to improve readability.",
        ],
    )
}
