//! 终端交互 - 基础设施层
//!
//! 持有唯一的行编辑器，只暴露"提问"和"确认"能力

use anyhow::{Context, Result};
use rustyline::DefaultEditor;

/// 终端提示器
pub struct Prompter {
    line_editor: DefaultEditor,
}

impl Prompter {
    pub fn new() -> Result<Self> {
        let line_editor = DefaultEditor::new().context("无法初始化终端输入")?;
        Ok(Self { line_editor })
    }

    /// 读取一行输入（去掉首尾空白）
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        let line = self
            .line_editor
            .readline(prompt)
            .context("读取终端输入失败")?;
        Ok(line.trim().to_string())
    }

    /// 是/否确认，空输入取默认值
    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = self.ask(&format!("{} {} ", prompt, hint))?;
        Ok(parse_confirmation(&answer).unwrap_or(default))
    }
}

fn parse_confirmation(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" | "是" => Some(true),
        "n" | "no" | "否" => Some(false),
        _ => None,
    }
}
