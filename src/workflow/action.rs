//! 会话动作与纯状态归约
//!
//! `reduce(&SessionState, Action) -> Result<SessionState, StageError>`：
//! 成功时返回新状态；失败时调用方保留旧状态，不会出现部分修改。

use std::fmt;

use crate::error::{LlmError, StageError};
use crate::infrastructure::docx;
use crate::models::{SessionState, Stage};

/// 生成服务调用结果（成功文本或失败原因）
pub type GenerationOutcome = Result<String, LlmError>;

/// 用户触发的会话动作
#[derive(Debug)]
pub enum Action {
    /// 上传文档（原始 .docx 字节）
    Ingest(Vec<u8>),
    /// 分析完成（由流程层发起网络调用后带回结果）
    Analyze(GenerationOutcome),
    /// 提交编辑后的分析文本
    CommitAnalysis(String),
    /// 提交编辑后的大纲
    CommitOutline(String),
    /// 结束会话，清空所有字段
    Reset,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Ingest(bytes) => write!(f, "Ingest({} bytes)", bytes.len()),
            Action::Analyze(Ok(_)) => write!(f, "Analyze(ok)"),
            Action::Analyze(Err(_)) => write!(f, "Analyze(err)"),
            Action::CommitAnalysis(_) => write!(f, "CommitAnalysis"),
            Action::CommitOutline(_) => write!(f, "CommitOutline"),
            Action::Reset => write!(f, "Reset"),
        }
    }
}

/// 归约一个动作
///
/// 前置条件：
/// - `Analyze` 需要非空的 `extracted_text`
/// - `CommitAnalysis` 需要 `analysis_text`
/// - `CommitOutline` 需要 `final_outline_input`
pub fn reduce(state: &SessionState, action: Action) -> Result<SessionState, StageError> {
    match action {
        Action::Ingest(bytes) => {
            let extracted = docx::extract_text(&bytes)?;
            Ok(SessionState {
                extracted_text: Some(extracted),
                ..state.clone()
            })
        }
        Action::Analyze(outcome) => {
            require(state, Stage::Analyze, "extracted_text")?;
            // 失败时保留之前的分析结果
            let analysis = outcome?;
            Ok(SessionState {
                analysis_text: Some(analysis),
                ..state.clone()
            })
        }
        Action::CommitAnalysis(edited) => {
            require(state, Stage::Refine, "analysis_text")?;
            Ok(SessionState {
                final_outline_input: Some(edited),
                ..state.clone()
            })
        }
        Action::CommitOutline(edited) => {
            if !state.outline_ready() {
                return Err(StageError::PreconditionNotMet {
                    stage: Stage::Refine,
                    missing: "final_outline_input",
                });
            }
            Ok(SessionState {
                final_manuscript_input: Some(edited),
                ..state.clone()
            })
        }
        Action::Reset => Ok(SessionState::new()),
    }
}

pub(crate) fn require(
    state: &SessionState,
    stage: Stage,
    missing: &'static str,
) -> Result<(), StageError> {
    if state.is_unlocked(stage) {
        Ok(())
    } else {
        Err(StageError::PreconditionNotMet { stage, missing })
    }
}
