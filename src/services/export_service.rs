//! 文稿导出服务 - 业务能力层
//!
//! 只负责"把最终文稿写成 Word 文档"能力，不关心流程。
//! 导出文件放在临时目录，不做清理。

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{DocumentError, FileError};
use crate::infrastructure::DocumentBuilder;
use crate::models::{ExportedManuscript, DOCX_MIME_TYPE, MANUSCRIPT_FILE_NAME};

/// 导出文档的标题
pub const MANUSCRIPT_HEADING: &str = "Generated Course Manuscript";

/// 追加在文稿末尾的占位行
pub const MANUSCRIPT_PLACEHOLDER: &str = "(Full manuscript would be expanded here.)";

/// 在最终输入后追加占位行（中间空一行）
pub fn compose_manuscript(final_manuscript_input: &str) -> String {
    format!("{}\n\n{}", final_manuscript_input, MANUSCRIPT_PLACEHOLDER)
}

/// 一个标题段落 + 每行一个段落（空行保留为空段落）
pub fn build_document(manuscript_text: &str) -> DocumentBuilder {
    let mut builder = DocumentBuilder::new();
    builder.add_heading(MANUSCRIPT_HEADING, 1);
    for line in manuscript_text.split('\n') {
        builder.add_paragraph(line);
    }
    builder
}

pub fn render_manuscript(manuscript_text: &str) -> Result<Vec<u8>, DocumentError> {
    build_document(manuscript_text).to_bytes()
}

/// 文稿导出服务
pub struct ExportService {
    export_dir: PathBuf,
}

impl ExportService {
    pub fn new(config: &Config) -> Self {
        Self::with_dir(&config.export_dir)
    }

    pub fn with_dir(export_dir: impl AsRef<Path>) -> Self {
        Self {
            export_dir: export_dir.as_ref().to_path_buf(),
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(MANUSCRIPT_FILE_NAME)
    }

    /// 生成文稿并写入导出目录
    ///
    /// 相同输入总是得到相同字节，重复导出会覆盖同名文件
    pub async fn export(&self, final_manuscript_input: &str) -> Result<ExportedManuscript, FileError> {
        let manuscript_text = compose_manuscript(final_manuscript_input);
        let bytes = render_manuscript(&manuscript_text)?;
        let path = self.export_path();

        debug!(
            "导出文稿: {} 行, {} 字节",
            manuscript_text.split('\n').count(),
            bytes.len()
        );

        tokio::fs::create_dir_all(&self.export_dir)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: self.export_dir.display().to_string(),
                source,
            })?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: path.display().to_string(),
                source,
            })?;

        info!("✓ 文稿已写入: {}", path.display());

        Ok(ExportedManuscript {
            path,
            file_name: MANUSCRIPT_FILE_NAME,
            mime_type: DOCX_MIME_TYPE,
            manuscript_text,
            bytes,
        })
    }
}
