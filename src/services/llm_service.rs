//! LLM 服务 - 业务能力层
//!
//! 只负责"生成分析文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务

use std::future::Future;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;
use crate::models::ApiKey;

/// 文本生成能力
///
/// 流程层只依赖这个 trait，测试时可以替换成桩实现
pub trait TextGenerator {
    /// 发送一条用户消息，返回第一条回复的文本
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// 分析请求的固定采样温度
pub const ANALYSIS_TEMPERATURE: f32 = 0.7;

/// 构建学习成果分析的提示词，原文完整嵌入
pub fn build_analysis_prompt(extracted_text: &str) -> String {
    format!(
        "You are an instructional designer. Based on the following pre-outline, answer questions about the course learning outcomes:\n\n{}\n\nGenerate thoughtful, practical responses for instructional planning.",
        extracted_text
    )
}

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 生成分析文本
/// - 每次调用只发送一条请求，不缓存、不重试
/// - 不修改会话状态
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config, api_key: &ApiKey) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key.expose())
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 构建请求：一条 user 消息 + 固定采样温度
    fn build_request(&self, user_message: &str) -> Result<CreateChatCompletionRequest, LlmError> {
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;

        CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(ANALYSIS_TEMPERATURE)
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))
    }

    /// 通用的 LLM 调用函数
    ///
    /// 返回第一条回复的原始文本（不做裁剪）
    pub async fn send_to_llm(&self, user_message: &str) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.chars().count());

        let request = self.build_request(user_message)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            LlmError::api_call_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyResponse {
                model: self.model_name.clone(),
            })?;

        choice.message.content.ok_or_else(|| LlmError::EmptyContent {
            model: self.model_name.clone(),
        })
    }
}

impl TextGenerator for LlmService {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.send_to_llm(prompt).await
    }
}
