//! 外部编辑器 - 基础设施层
//!
//! 把待编辑文本写入临时文件，交给 `$VISUAL` / `$EDITOR` 修改后读回

use std::io::Write;
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

/// 文本编辑能力
///
/// - 未配置编辑器或关闭编辑时，原样返回文本
/// - 不关心编辑的是哪个阶段的内容
pub struct TextEditor {
    command: Option<String>,
}

impl TextEditor {
    /// 从环境变量中查找编辑器
    pub fn from_env() -> Self {
        let command = std::env::var("VISUAL")
            .or_else(|_| std::env::var("EDITOR"))
            .ok()
            .filter(|c| !c.trim().is_empty());
        Self { command }
    }

    /// 不启动编辑器，直接接受原文
    pub fn disabled() -> Self {
        Self { command: None }
    }

    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.command.is_some()
    }

    /// 编辑文本，返回编辑后的内容
    pub fn edit(&self, initial: &str) -> Result<String> {
        let Some(command) = &self.command else {
            debug!("未配置编辑器，保留原文");
            return Ok(initial.to_string());
        };

        let mut file = tempfile::Builder::new()
            .prefix("course_builder_")
            .suffix(".md")
            .tempfile()
            .context("无法创建临时编辑文件")?;
        file.write_all(initial.as_bytes())
            .context("无法写入临时编辑文件")?;
        file.flush()?;

        // 编辑器命令可能带参数，例如 "code --wait"
        let mut parts = command.split_whitespace();
        let program = parts.next().unwrap_or_default();
        let status = Command::new(program)
            .args(parts)
            .arg(file.path())
            .status()
            .with_context(|| format!("无法启动编辑器: {}", command))?;

        if !status.success() {
            warn!("编辑器异常退出: {}", status);
            bail!("编辑器 {} 退出码异常: {}", command, status);
        }

        let edited = std::fs::read_to_string(file.path())
            .with_context(|| format!("无法读取编辑结果: {}", file.path().display()))?;

        Ok(edited)
    }
}
