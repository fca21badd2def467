//! Word 文档（.docx）读写 - 基础设施层
//!
//! 只处理段落级纯文本：不读样式、表格、图片。
//!
//! ## 技术栈
//! - `zip`: .docx 是一个 OPC zip 包
//! - `quick-xml`: 流式解析 / 转义 `word/document.xml`

pub mod reader;
pub mod writer;

pub use reader::{extract_text, join_non_blank, read_paragraphs};
pub use writer::DocumentBuilder;

/// 正文部件在包内的路径
pub const DOCUMENT_PART: &str = "word/document.xml";

/// WordprocessingML 主命名空间
pub(crate) const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
