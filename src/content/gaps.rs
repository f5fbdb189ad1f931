//! 薄弱点抽取与练习题模板

/// 已知学科关键词，按顺序匹配
const TOPIC_KEYWORDS: &[&str] = &[
    "fractions",
    "decimals",
    "algebra",
    "linear equations",
    "geometry",
    "grammar",
    "reading comprehension",
    "chemistry",
    "physics",
];

/// 未命中关键词时，截取原文的最大字符数
const FALLBACK_GAP_CHARS: usize = 42;
const MAX_EXTRACTED_GAPS: usize = 3;

/// 按关键词子串抽取薄弱点；都没命中时用消息开头作为唯一薄弱点
pub fn extract_learning_gaps(message: &str) -> Vec<String> {
    let lowered = message.to_lowercase();
    let mut candidates: Vec<String> = TOPIC_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(**kw))
        .map(|kw| kw.to_string())
        .collect();

    let trimmed = message.trim();
    if candidates.is_empty() && !trimmed.is_empty() {
        candidates.push(trimmed.chars().take(FALLBACK_GAP_CHARS).collect());
    }

    candidates.truncate(MAX_EXTRACTED_GAPS);
    candidates
}

/// 以第一个薄弱点为焦点生成 3 道题
pub fn generate_questions(gaps: &[String]) -> Vec<String> {
    let focus = gaps.first().map(String::as_str).unwrap_or("the target skill");
    vec![
        format!("Solve two problems that apply {} in different contexts.", focus),
        format!(
            "Explain each step you used to solve a {} problem in plain text.",
            focus
        ),
        format!("Create one new {} question and solve it completely.", focus),
    ]
}
