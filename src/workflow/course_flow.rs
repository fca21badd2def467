//! 课程构建流程 - 流程层
//!
//! 核心职责：持有会话状态，执行每个阶段的副作用（读文件、调 LLM、写文件），
//! 再把结果交给 [`reduce`] 产生新状态。
//!
//! 流程顺序：
//! 1. Ingest → 2. Analyze → 3. Refine（提交分析 / 提交大纲）→ 4. Publish

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{FileError, StageError};
use crate::models::{ExportedManuscript, SessionState, Stage};
use crate::services::{build_analysis_prompt, ExportService, TextGenerator};
use crate::utils::logging::truncate_text;
use crate::workflow::action::{reduce, require, Action};

/// 课程构建流程
///
/// - 一个实例对应一个用户会话
/// - 每个动作独占执行，失败不修改状态
/// - 不持有 LLM 客户端（凭据由调用方在分析时提供）
pub struct CourseFlow {
    state: SessionState,
    exporter: ExportService,
}

impl CourseFlow {
    /// 开始新会话
    pub fn new(config: &Config) -> Self {
        Self::with_exporter(ExportService::new(config))
    }

    pub fn with_exporter(exporter: ExportService) -> Self {
        Self {
            state: SessionState::new(),
            exporter,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// 应用一个动作；失败时保留原状态
    pub fn dispatch(&mut self, action: Action) -> Result<&SessionState, StageError> {
        let label = action.to_string();
        match reduce(&self.state, action) {
            Ok(next) => {
                debug!("动作 {} 完成，当前阶段: {}", label, next.current_stage());
                self.state = next;
                Ok(&self.state)
            }
            Err(e) => {
                warn!("动作 {} 被拒绝: {}", label, e);
                Err(e)
            }
        }
    }

    /// Step 1: 导入文档字节
    pub fn ingest(&mut self, bytes: Vec<u8>) -> Result<&str, StageError> {
        info!("📄 正在解析文档 ({} 字节)...", bytes.len());
        self.dispatch(Action::Ingest(bytes))?;

        let text = self.state.extracted_text().unwrap_or_default();
        info!(
            "✓ 文档解析完成，共 {} 行",
            if text.is_empty() { 0 } else { text.lines().count() }
        );
        Ok(text)
    }

    /// Step 1: 从路径读取并导入文档
    pub async fn ingest_file(&mut self, path: &Path) -> Result<&str, StageError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| FileError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;
        self.ingest(bytes)
    }

    /// Step 2: 调用生成服务分析学习成果
    ///
    /// 每次调用都会发送一次请求并覆盖之前的结果；失败时之前的结果保持不变
    pub async fn analyze<G: TextGenerator>(&mut self, generator: &G) -> Result<&str, StageError> {
        require(&self.state, Stage::Analyze, "extracted_text")?;

        let extracted = self.state.extracted_text().unwrap_or_default();
        let prompt = build_analysis_prompt(extracted);
        info!("🤖 正在调用 LLM 分析学习成果...");
        debug!("提示词预览: {}", truncate_text(&prompt, 120));

        let outcome = generator.generate(&prompt).await;
        if let Err(e) = &outcome {
            error!("❌ LLM 分析失败: {}", e);
        }

        self.dispatch(Action::Analyze(outcome))?;
        let analysis = self.state.analysis_text().unwrap_or_default();
        info!("✓ 分析完成，返回 {} 个字符", analysis.chars().count());
        Ok(analysis)
    }

    /// Step 3a: 提交编辑后的分析文本，返回派生的大纲模板
    pub fn commit_analysis(&mut self, edited: impl Into<String>) -> Result<String, StageError> {
        self.dispatch(Action::CommitAnalysis(edited.into()))?;
        info!("✅ 分析结果已确认，已生成大纲模板");
        Ok(self.state.outline_text().unwrap_or_default())
    }

    /// Step 3b: 提交编辑后的大纲
    pub fn commit_outline(&mut self, edited: impl Into<String>) -> Result<&str, StageError> {
        self.dispatch(Action::CommitOutline(edited.into()))?;
        info!("📝 大纲已确认，可以导出文稿");
        Ok(self.state.final_manuscript_input().unwrap_or_default())
    }

    /// Step 4: 导出 Word 文稿（不修改会话状态）
    pub async fn publish(&self) -> Result<ExportedManuscript, StageError> {
        require(&self.state, Stage::Publish, "final_manuscript_input")?;
        let final_input = self.state.final_manuscript_input().unwrap_or_default();

        info!("📦 正在生成 Word 文稿...");
        let exported = self.exporter.export(final_input).await?;
        Ok(exported)
    }

    /// 结束会话
    pub fn reset(&mut self) {
        // Reset 没有前置条件，不会失败
        if self.dispatch(Action::Reset).is_ok() {
            info!("🔄 会话已重置");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::infrastructure::DocumentBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 桩生成器：记录调用次数，返回固定结果
    struct StubGenerator {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(prompt.contains("Intro"));
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(LlmError::api_call_failed(
                    "stub",
                    std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"),
                )),
            }
        }
    }

    fn sample_docx() -> Vec<u8> {
        let mut builder = DocumentBuilder::new();
        builder
            .add_paragraph("Intro")
            .add_paragraph("")
            .add_paragraph("Goals: X");
        builder.to_bytes().unwrap()
    }

    fn flow_in(dir: &Path) -> CourseFlow {
        CourseFlow::with_exporter(ExportService::with_dir(dir))
    }

    #[tokio::test]
    async fn test_analyze_is_not_sent_before_ingest() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut flow = flow_in(dir.path());
        let generator = StubGenerator::replying("answers");

        assert!(flow.analyze(&generator).await.is_err());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_error_keeps_refine_hidden() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut flow = flow_in(dir.path());
        flow.ingest(sample_docx()).unwrap();

        let err = flow.analyze(&StubGenerator::failing()).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert!(flow.state().analysis_text().is_none());
        assert!(!flow.state().is_unlocked(Stage::Refine));
    }

    #[tokio::test]
    async fn test_each_analyze_sends_one_request() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut flow = flow_in(dir.path());
        flow.ingest(sample_docx()).unwrap();

        let generator = StubGenerator::replying("answers");
        flow.analyze(&generator).await.unwrap();
        flow.analyze(&generator).await.unwrap();
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_full_session() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut flow = flow_in(dir.path());

        assert_eq!(flow.ingest(sample_docx()).unwrap(), "Intro\nGoals: X");
        flow.analyze(&StubGenerator::replying("A".repeat(150).as_str()))
            .await
            .unwrap();

        let analysis = flow.state().analysis_text().unwrap().to_string();
        let outline = flow.commit_analysis(analysis).unwrap();
        assert!(outline.ends_with(&format!("{}...", "A".repeat(100))));

        assert!(flow.publish().await.is_err());
        flow.commit_outline("line1\n\nline3").unwrap();

        let exported = flow.publish().await.unwrap();
        assert_eq!(
            exported.manuscript_text,
            "line1\n\nline3\n\n(Full manuscript would be expanded here.)"
        );
        assert!(exported.path.exists());

        flow.reset();
        assert_eq!(flow.state(), &SessionState::new());
    }

    #[tokio::test]
    async fn test_ingest_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut flow = flow_in(dir.path());
        let err = flow.ingest_file(&dir.path().join("missing.docx")).await.unwrap_err();
        assert!(matches!(err, StageError::File(FileError::ReadFailed { .. })));
    }
}
