use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::cli::Cli;
use crate::config::Config;
use crate::infrastructure::{Prompter, TextEditor};
use crate::models::{ApiKey, Stage};
use crate::services::LlmService;
use crate::utils::logging::{log_stage_banner, log_startup, print_session_summary};
use crate::workflow::CourseFlow;

/// 应用主结构
///
/// 一次运行就是一个会话：逐个阶段推进，阶段未解锁时不会出现后续步骤
pub struct App {
    config: Config,
    cli: Cli,
    flow: CourseFlow,
    prompter: Prompter,
    editor: TextEditor,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, cli: Cli) -> Result<Self> {
        log_startup(&config.llm_model_name);

        let editor = if cli.no_edit {
            TextEditor::disabled()
        } else {
            TextEditor::from_env()
        };
        if !cli.no_edit && !editor.is_enabled() {
            warn!("⚠️ 未设置 $VISUAL / $EDITOR，将直接使用生成的文本");
        }

        Ok(Self {
            flow: CourseFlow::new(&config),
            prompter: Prompter::new()?,
            editor,
            config,
            cli,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(mut self) -> Result<()> {
        let result = self.run_stages().await;

        let export_path = match &result {
            Ok(Some(path)) => Some(path.display().to_string()),
            _ => None,
        };
        print_session_summary(self.flow.state(), export_path.as_deref());

        // 会话结束，凭据和所有文本随之丢弃
        self.flow.reset();

        result.map(|_| ())
    }

    /// 依次执行四个阶段，返回导出文件路径
    async fn run_stages(&mut self) -> Result<Option<PathBuf>> {
        // ========== Step 1: 导入预大纲 ==========
        log_stage_banner(Stage::Ingest, "导入预大纲文档");
        if !self.ingest().await? {
            return Ok(None);
        }
        if !self.flow.state().is_unlocked(Stage::Analyze) {
            warn!("⚠️ 文档中没有可用文本，无法继续");
            return Ok(None);
        }

        // ========== Step 2: LLM 分析 ==========
        log_stage_banner(Stage::Analyze, "生成并编辑学习成果分析");
        let api_key = self.api_key()?;
        let llm = LlmService::new(&self.config, &api_key);
        if !self.analyze(&llm).await? {
            return Ok(None);
        }

        // ========== Step 3: 人工编辑 ==========
        log_stage_banner(Stage::Refine, "编辑分析结果与课程大纲");
        let analysis = self.flow.state().analysis_text().unwrap_or_default().to_string();
        info!("✏️ 请编辑 LLM 建议的学习成果分析");
        let edited_analysis = self.edit(&analysis)?;
        let outline = self.flow.commit_analysis(edited_analysis)?;
        print_block("课程大纲（可编辑）", &outline);

        info!("✏️ 请编辑课程大纲");
        let edited_outline = self.edit(&outline)?;
        self.flow.commit_outline(edited_outline)?;

        // ========== Step 4: 导出 ==========
        log_stage_banner(Stage::Publish, "预览并导出课程文稿");
        let exported = self.flow.publish().await?;
        print_block("最终课程文稿预览", &exported.manuscript_text);

        match &self.cli.output {
            Some(output) => {
                tokio::fs::write(output, &exported.bytes)
                    .await
                    .with_context(|| format!("无法保存文稿到: {}", output.display()))?;
                info!(
                    "⬇️ 已保存 {} ({})",
                    output.display(),
                    exported.mime_type
                );
                Ok(Some(output.clone()))
            }
            None => {
                info!(
                    "⬇️ 文稿 {} 位于: {}",
                    exported.file_name,
                    exported.path.display()
                );
                Ok(Some(exported.path))
            }
        }
    }

    /// 导入文档；失败时允许换一个文件重试
    async fn ingest(&mut self) -> Result<bool> {
        let mut path = self.cli.input.clone();
        loop {
            match self.flow.ingest_file(&path).await {
                Ok(text) => {
                    info!("✓ 预大纲加载成功: {}", path.display());
                    print_block("提取的预大纲文本", text);
                    return Ok(true);
                }
                Err(e) => {
                    error!("❌ {}", e);
                    let answer = self
                        .prompter
                        .ask("请输入另一个 .docx 文件路径（留空退出）: ")?;
                    if answer.is_empty() {
                        return Ok(false);
                    }
                    path = PathBuf::from(answer);
                }
            }
        }
    }

    /// 命令行 / 环境变量提供的密钥优先，否则在终端询问
    fn api_key(&mut self) -> Result<ApiKey> {
        if let Some(key) = self.cli.api_key.as_deref() {
            match ApiKey::new(key) {
                Ok(key) => return Ok(key),
                Err(e) => warn!("⚠️ {}", e),
            }
        }

        loop {
            let input = self.prompter.ask("请输入 OpenAI API Key: ")?;
            match ApiKey::new(input) {
                Ok(key) => return Ok(key),
                Err(e) => warn!("⚠️ {}", e),
            }
        }
    }

    /// 编辑文本；编辑器失败时询问是否重试，不重试则提交未编辑的文本
    fn edit(&mut self, text: &str) -> Result<String> {
        let prompter = &mut self.prompter;
        edit_with_fallback(&self.editor, text, |_| {
            prompter.confirm("重新打开编辑器?（否则提交未编辑的文本）", true)
        })
    }

    /// 调用 LLM 分析；失败时可重试，成功后可再次分析覆盖结果
    ///
    /// 返回是否得到了可编辑的分析结果
    async fn analyze(&mut self, llm: &LlmService) -> Result<bool> {
        loop {
            match self.flow.analyze(llm).await {
                Ok(analysis) => {
                    print_block("LLM 建议的学习成果分析", analysis);
                    if !self
                        .prompter
                        .confirm("🔍 重新分析（会覆盖当前结果）?", false)?
                    {
                        return Ok(true);
                    }
                }
                Err(e) => {
                    error!("❌ {}", e);
                    let has_previous = self.flow.state().analysis_text().is_some();
                    if !self.prompter.confirm("重试分析?", true)? {
                        return Ok(has_previous);
                    }
                }
            }
        }
    }
}

/// 打开编辑器直到成功，或 `retry` 返回 `false` 时原样返回文本
fn edit_with_fallback<F>(editor: &TextEditor, text: &str, mut retry: F) -> Result<String>
where
    F: FnMut(&anyhow::Error) -> Result<bool>,
{
    loop {
        match editor.edit(text) {
            Ok(edited) => return Ok(edited),
            Err(e) => {
                error!("❌ {:#}", e);
                if !retry(&e)? {
                    warn!("⚠️ 保留未编辑的文本");
                    return Ok(text.to_string());
                }
            }
        }
    }
}

/// 在终端打印一段带标题的文本
fn print_block(title: &str, body: &str) {
    println!("\n┌─ {}", title);
    for line in body.split('\n') {
        println!("│ {}", line);
    }
    println!("└{}", "─".repeat(59));
}
