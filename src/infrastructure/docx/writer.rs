use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{DOCUMENT_PART, WORDML_NS};
use crate::error::DocumentError;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// 标题最大级别
const MAX_HEADING_LEVEL: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Paragraph {
    Heading { text: String, level: u8 },
    Body(String),
}

/// 构建只含段落文本的 Word 文档
///
/// 输出是确定性的：部件顺序固定，zip 时间戳固定为 1980-01-01，
/// 相同内容总是得到相同字节。
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    paragraphs: Vec<Paragraph>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加标题段落，级别限制在 1..=9
    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) -> &mut Self {
        self.paragraphs.push(Paragraph::Heading {
            text: text.into(),
            level: level.clamp(1, MAX_HEADING_LEVEL),
        });
        self
    }

    /// 添加正文段落；`\t` 写成制表符，`\n` / `\r` 写成换行
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.paragraphs.push(Paragraph::Body(text.into()));
        self
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// 序列化为 .docx 字节
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let document_xml = self.document_xml();
        let styles_xml = styles_xml();

        let parts: [(&str, &str); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", PACKAGE_RELS),
            (DOCUMENT_PART, document_xml.as_str()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS),
            ("word/styles.xml", styles_xml.as_str()),
        ];

        let mut archive = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut archive));
            let options = SimpleFileOptions::default()
                .last_modified_time(zip::DateTime::default())
                .compression_method(CompressionMethod::Deflated);

            for (path, content) in parts {
                zip.start_file(path, options)?;
                zip.write_all(content.as_bytes())?;
            }

            zip.finish()?;
        }

        Ok(archive)
    }

    fn document_xml(&self) -> String {
        let mut body = String::new();
        for paragraph in &self.paragraphs {
            match paragraph {
                Paragraph::Heading { text, level } => {
                    body.push_str("<w:p><w:pPr><w:pStyle w:val=\"Heading");
                    body.push_str(&level.to_string());
                    body.push_str("\"/></w:pPr>");
                    push_runs(&mut body, text);
                    body.push_str("</w:p>");
                }
                Paragraph::Body(text) if text.is_empty() => body.push_str("<w:p/>"),
                Paragraph::Body(text) => {
                    body.push_str("<w:p>");
                    push_runs(&mut body, text);
                    body.push_str("</w:p>");
                }
            }
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#,
            WORDML_NS, body
        )
    }
}

/// 把段落文本写成一个 run，制表符和换行转成对应元素
fn push_runs(out: &mut String, text: &str) {
    out.push_str("<w:r>");
    let mut pending = String::new();
    for c in text.chars() {
        match c {
            '\t' => {
                flush_text(out, &mut pending);
                out.push_str("<w:tab/>");
            }
            '\n' | '\r' => {
                flush_text(out, &mut pending);
                out.push_str("<w:br/>");
            }
            // XML 1.0 不允许的控制字符直接丢弃
            c if (c as u32) < 0x20 => {}
            c => pending.push(c),
        }
    }
    flush_text(out, &mut pending);
    out.push_str("</w:r>");
}

fn flush_text(out: &mut String, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    out.push_str("<w:t xml:space=\"preserve\">");
    out.push_str(&escape(pending.as_str()));
    out.push_str("</w:t>");
    pending.clear();
}

fn styles_xml() -> String {
    let mut styles = String::from(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    );
    for level in 1..=MAX_HEADING_LEVEL {
        // 一级标题 16pt，逐级递减，最小 11pt
        let half_points = 32u8.saturating_sub((level - 1) * 4).max(22);
        styles.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="60"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:sz w:val="{half_points}"/></w:rPr></w:style>"#,
            level = level,
            outline = level - 1,
            half_points = half_points,
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{}">{}</w:styles>"#,
        WORDML_NS, styles
    )
}
