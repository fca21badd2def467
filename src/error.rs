use thiserror::Error;

use crate::models::Stage;

/// 文档读写错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// zip 包读写失败（.docx 本质上是 zip）
    #[error("文档包读写失败: {0}")]
    Archive(#[from] zip::result::ZipError),
    /// 文档包中缺少必要的部件
    #[error("文档包中缺少部件: {part}")]
    MissingPart { part: String },
    /// XML 解析失败
    #[error("XML解析失败 ({part}): {message}")]
    MalformedXml { part: String, message: String },
    /// 写入文档包失败
    #[error("写入文档包失败: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    pub(crate) fn malformed(part: &str, err: impl std::fmt::Display) -> Self {
        DocumentError::MalformedXml {
            part: part.to_string(),
            message: err.to_string(),
        }
    }
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 没有提供 API 密钥
    #[error("未提供 API 密钥")]
    MissingCredential,
    /// 请求构建失败
    #[error("LLM 请求构建失败: {0}")]
    InvalidRequest(String),
    /// API 调用失败（网络、鉴权、服务端错误）
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空
    #[error("LLM返回结果为空 (模型: {model})")]
    EmptyResponse { model: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

impl LlmError {
    /// 创建 API 调用失败错误
    pub fn api_call_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        }
    }
}

/// 流程阶段错误
///
/// 失败的动作不会修改会话状态
#[derive(Debug, Error)]
pub enum StageError {
    /// 前置阶段尚未完成
    #[error("阶段 {stage} 尚未解锁: 缺少 {missing}")]
    PreconditionNotMet { stage: Stage, missing: &'static str },
    /// 文档导入失败
    #[error("导入失败: {0}")]
    Ingest(#[from] DocumentError),
    /// 生成服务调用失败
    #[error("分析失败: {0}")]
    Generation(#[from] LlmError),
    /// 读写文件失败
    #[error("文件操作失败: {0}")]
    File(#[from] FileError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },
    /// 生成文档失败
    #[error("生成文档失败: {0}")]
    Render(#[from] DocumentError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: toml::de::Error,
    },
}
