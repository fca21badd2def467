use std::path::PathBuf;

/// 导出文件名
pub const MANUSCRIPT_FILE_NAME: &str = "course_manuscript.docx";

/// Word 文档 MIME 类型
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// 导出的文稿，可供下载
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedManuscript {
    /// 临时文件路径
    pub path: PathBuf,
    pub file_name: &'static str,
    pub mime_type: &'static str,
    /// 文稿正文（已追加占位行）
    pub manuscript_text: String,
    pub bytes: Vec<u8>,
}
