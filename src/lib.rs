//! # Course Builder
//!
//! 一个由 LLM 辅助、人工逐步确认的课程文稿构建向导
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `docx` - Word 文档段落读写
//! - `TextEditor` / `Prompter` - 外部编辑器与终端输入
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `LlmService` - 学习成果分析（生成）能力
//! - `outline_service` - 大纲模板
//! - `ExportService` - 导出 Word 文稿能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义一个会话的完整流程
//! - `reduce` - 纯状态归约（SessionState, Action）→ SessionState
//! - `CourseFlow` - 执行副作用（Ingest → Analyze → Refine → Publish）
//!
//! ### ④ 应用层（App）
//! - `app` - 终端向导，按阶段解锁情况推进
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use cli::Cli;
pub use config::Config;
pub use error::{ConfigError, DocumentError, FileError, LlmError, StageError};
pub use models::{ApiKey, ExportedManuscript, SessionState, Stage};
pub use services::{ExportService, LlmService, TextGenerator};
pub use workflow::{reduce, Action, CourseFlow, GenerationOutcome};
