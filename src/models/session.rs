//! 会话记录
//!
//! 每个字段在产生它的阶段提交之前都是 `None`。
//! 字段 n 存在是阶段 n+1 解锁的前提；会话内不会回滚任何字段。

use crate::models::Stage;
use crate::services::outline_service;

/// 单个用户会话的状态
///
/// 只能通过 [`crate::workflow::reduce`] 产生新状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) extracted_text: Option<String>,
    pub(crate) analysis_text: Option<String>,
    pub(crate) final_outline_input: Option<String>,
    pub(crate) final_manuscript_input: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extracted_text(&self) -> Option<&str> {
        self.extracted_text.as_deref()
    }

    pub fn analysis_text(&self) -> Option<&str> {
        self.analysis_text.as_deref()
    }

    pub fn final_outline_input(&self) -> Option<&str> {
        self.final_outline_input.as_deref()
    }

    pub fn final_manuscript_input(&self) -> Option<&str> {
        self.final_manuscript_input.as_deref()
    }

    /// 由 `final_outline_input` 派生的大纲模板
    pub fn outline_text(&self) -> Option<String> {
        self.final_outline_input
            .as_deref()
            .map(outline_service::derive_outline)
    }

    /// 阶段是否已解锁
    ///
    /// Refine 的第一步只要求分析结果存在；导出要求最终文稿输入存在
    pub fn is_unlocked(&self, stage: Stage) -> bool {
        match stage {
            Stage::Ingest => true,
            Stage::Analyze => self.extracted_text.as_deref().is_some_and(|t| !t.is_empty()),
            Stage::Refine => self.analysis_text.is_some(),
            Stage::Publish => self.final_manuscript_input.is_some(),
        }
    }

    /// 已解锁的阶段（按顺序）
    pub fn unlocked_stages(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.is_unlocked(*stage))
            .collect()
    }

    /// 最靠后的已解锁阶段
    pub fn current_stage(&self) -> Stage {
        self.unlocked_stages()
            .last()
            .copied()
            .unwrap_or(Stage::Ingest)
    }

    /// 大纲编辑步骤是否可用
    pub fn outline_ready(&self) -> bool {
        self.final_outline_input.is_some()
    }
}
