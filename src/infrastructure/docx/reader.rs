use std::io::{Cursor, Read};

use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use super::DOCUMENT_PART;
use crate::error::DocumentError;

/// 读取文档正文中的段落文本（按原顺序，包括空段落）
///
/// 只统计 `w:body` 的直接子段落，表格、文本框里的段落不算。
pub fn read_paragraphs(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    let xml = read_document_part(bytes)?;
    parse_body_paragraphs(&xml)
}

/// 提取文档纯文本：丢弃空白段落，其余按原顺序用换行连接
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let paragraphs = read_paragraphs(bytes)?;
    Ok(join_non_blank(&paragraphs))
}

pub fn join_non_blank(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_document_part(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut part = match archive.by_name(DOCUMENT_PART) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => {
            return Err(DocumentError::MissingPart {
                part: DOCUMENT_PART.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| DocumentError::malformed(DOCUMENT_PART, e))?;
    Ok(xml)
}

fn parse_body_paragraphs(xml: &str) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DocumentError::malformed(DOCUMENT_PART, e))?;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && ends_with(&stack, &[b"body"]) {
                    current = Some(String::new());
                }
                stack.push(name);
            }
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if ends_with(&stack, &[b"body"]) => paragraphs.push(String::new()),
                b"tab" | b"ptab" if in_body_run(&stack) => push_char(&mut current, '\t'),
                b"noBreakHyphen" if in_body_run(&stack) => push_char(&mut current, '-'),
                b"br" | b"cr" if in_body_run(&stack) && is_line_break(&e) => {
                    push_char(&mut current, '\n')
                }
                _ => {}
            },
            Event::End(_) => {
                let closed = stack.pop();
                if closed.as_deref() == Some(b"p".as_slice()) && ends_with(&stack, &[b"body"]) {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                }
            }
            Event::Text(e) if in_body_text(&stack) => {
                let raw = reader
                    .decoder()
                    .decode(&e)
                    .map_err(|err| DocumentError::malformed(DOCUMENT_PART, err))?;
                let text = unescape(&raw).map_err(|err| DocumentError::malformed(DOCUMENT_PART, err))?;
                push_str(&mut current, &text);
            }
            Event::CData(e) if in_body_text(&stack) => {
                let text = reader
                    .decoder()
                    .decode(&e)
                    .map_err(|err| DocumentError::malformed(DOCUMENT_PART, err))?;
                push_str(&mut current, &text);
            }
            Event::GeneralRef(e) if in_body_text(&stack) => {
                let name = reader
                    .decoder()
                    .decode(&e)
                    .map_err(|err| DocumentError::malformed(DOCUMENT_PART, err))?;
                let resolved = resolve_reference(&name).ok_or_else(|| {
                    DocumentError::malformed(DOCUMENT_PART, format!("无法识别的实体引用: &{};", name))
                })?;
                push_str(&mut current, &resolved);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// 栈顶是否依次为给定元素（只比较本地名）
fn ends_with(stack: &[Vec<u8>], names: &[&[u8]]) -> bool {
    stack.len() >= names.len()
        && stack[stack.len() - names.len()..]
            .iter()
            .zip(names)
            .all(|(a, b)| a.as_slice() == *b)
}

fn in_body_run(stack: &[Vec<u8>]) -> bool {
    ends_with(stack, &[b"body", b"p", b"r"]) || ends_with(stack, &[b"body", b"p", b"hyperlink", b"r"])
}

fn in_body_text(stack: &[Vec<u8>]) -> bool {
    ends_with(stack, &[b"body", b"p", b"r", b"t"])
        || ends_with(stack, &[b"body", b"p", b"hyperlink", b"r", b"t"])
}

/// 分页符和分栏符不产生文本，只有普通换行算作 `\n`
fn is_line_break(e: &BytesStart) -> bool {
    if e.local_name().as_ref() == b"cr" {
        return true;
    }
    match e
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"type")
    {
        Some(attr) => attr.value.as_ref() == b"textWrapping",
        None => true,
    }
}

fn resolve_reference(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}

fn push_char(current: &mut Option<String>, c: char) {
    if let Some(text) = current {
        text.push(c);
    }
}

fn push_str(current: &mut Option<String>, s: &str) {
    if let Some(text) = current {
        text.push_str(s);
    }
}
