//! 大纲模板 - 业务能力层
//!
//! 不调用 LLM：大纲是固定模板，只嵌入编辑后分析结果的前 100 个字符

/// 学习成果行嵌入的最大字符数
pub const OUTLINE_EXCERPT_CHARS: usize = 100;

/// 截断标记（无论是否截断都会追加）
pub const ELLIPSIS: &str = "...";

/// 唯一模块的固定主题
pub const MODULE_TOPIC: &str = "Introduction";

/// 取前 `OUTLINE_EXCERPT_CHARS` 个字符（按 Unicode 标量计数，不按字节）
pub fn excerpt(input: &str) -> &str {
    match input.char_indices().nth(OUTLINE_EXCERPT_CHARS) {
        Some((byte_index, _)) => &input[..byte_index],
        None => input,
    }
}

/// 由最终分析文本派生课程大纲
pub fn derive_outline(final_outline_input: &str) -> String {
    format!(
        "# Course Outline\n\n## Module 1\n- Topic: {}\n- Learning Outcome: {}{}",
        MODULE_TOPIC,
        excerpt(final_outline_input),
        ELLIPSIS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learning_outcome_line(outline: &str) -> &str {
        outline
            .lines()
            .find(|line| line.starts_with("- Learning Outcome: "))
            .unwrap()
    }

    #[test]
    fn test_long_input_is_cut_at_100_chars() {
        let outline = derive_outline(&"A".repeat(150));
        let line = learning_outcome_line(&outline);
        assert!(line.ends_with(&format!("{}...", "A".repeat(100))));
        assert_eq!(line, format!("- Learning Outcome: {}...", "A".repeat(100)));
    }

    #[test]
    fn test_short_and_empty_input_still_get_ellipsis() {
        assert!(derive_outline("short").ends_with("- Learning Outcome: short..."));
        assert!(derive_outline("").ends_with("- Learning Outcome: ..."));
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let input = "学".repeat(120);
        assert_eq!(excerpt(&input).chars().count(), 100);
        assert_eq!(excerpt("é").len(), "é".len());
    }

    #[test]
    fn test_outline_template() {
        assert_eq!(
            derive_outline("Learners will plan"),
            "# Course Outline\n\n## Module 1\n- Topic: Introduction\n- Learning Outcome: Learners will plan..."
        );
    }
}
