//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use tracing::info;

use crate::models::{SessionState, Stage};

/// 记录程序启动信息
///
/// # 参数
/// - `model`: 使用的模型名称
pub fn log_startup(model: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 课程构建向导");
    info!("🤖 LLM 模型: {}", model);
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始信息
pub fn log_stage_banner(stage: Stage, title: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📘 Step {}: {} ({})", stage.step(), title, stage);
    info!("{}", "─".repeat(60));
}

/// 打印会话结束统计
///
/// # 参数
/// - `state`: 会话最终状态
/// - `export_path`: 导出文件路径（未导出时为 `None`）
pub fn print_session_summary(state: &SessionState, export_path: Option<&str>) {
    info!("\n{}", "=".repeat(60));
    info!("📊 会话结束");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("最后到达阶段: {}", state.current_stage());
    match export_path {
        Some(path) => info!("✅ 文稿已导出: {}", path),
        None => info!("⚠️ 本次会话未导出文稿"),
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("课程构建向导", 2), "课程...");
    }
}
