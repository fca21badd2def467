use std::fmt;

use crate::error::LlmError;

/// 生成服务的 API 密钥
///
/// 只存在于会话内存中，`Debug` 输出会被隐藏
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// 空白密钥视为未提供
    pub fn new(key: impl Into<String>) -> Result<Self, LlmError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(LlmError::MissingCredential);
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
