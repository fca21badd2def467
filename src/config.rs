use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置文件
///
/// API 密钥不属于配置：它只在会话内存中存在，见 [`crate::models::ApiKey`]
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 导出文档存放目录（默认系统临时目录）
    pub export_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4".to_string(),
            export_dir: std::env::temp_dir().to_string_lossy().to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        Ok(Self {
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            export_dir: std::env::var("EXPORT_DIR").unwrap_or(default.export_dir),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?.unwrap_or(default.verbose_logging),
        })
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// 读取并解析环境变量；变量不存在时返回 `None`，存在但无法解析时报错
fn parse_env<T: std::str::FromStr>(
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_settings() {
        let config = Config::default();
        assert_eq!(config.llm_model_name, "gpt-4");
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = Config::from_toml_str(
            r#"
            llm_model_name = "gpt-4o-mini"
            verbose_logging = true
            "#,
        )
        .unwrap();

        assert_eq!(config.llm_model_name, "gpt-4o-mini");
        assert!(config.verbose_logging);
        assert_eq!(config.llm_api_base_url, Config::default().llm_api_base_url);
    }

    #[test]
    fn test_toml_file_errors_carry_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("course_builder.toml");
        std::fs::write(&path, "verbose_logging = \"loud\"").unwrap();

        let err = Config::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseFailed { .. }));
        assert!(err.to_string().contains("course_builder.toml"));

        let missing = Config::from_toml_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::ReadFailed { .. }));
    }
}
