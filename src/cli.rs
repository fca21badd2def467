use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::ConfigError;

/// 课程构建向导：导入预大纲 → LLM 分析 → 人工编辑 → 导出 Word 文稿
#[derive(Debug, Parser)]
#[command(name = "course_builder", version, about)]
pub struct Cli {
    /// 预大纲 .docx 文件
    pub input: PathBuf,

    /// TOML 配置文件（不指定时从环境变量读取）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM API 密钥（不指定时在终端中询问）
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// 覆盖模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// 覆盖 API 地址
    #[arg(long)]
    pub base_url: Option<String>,

    /// 导出后复制一份到该路径
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 不打开编辑器，直接接受生成的文本
    #[arg(long)]
    pub no_edit: bool,

    /// 显示详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 加载配置并应用命令行覆盖
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::from_env()?,
        };

        if let Some(model) = &self.model {
            config.llm_model_name = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.llm_api_base_url = base_url.clone();
        }
        config.verbose_logging |= self.verbose;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("course_builder.toml");
        std::fs::write(&path, "llm_model_name = \"from-file\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "course_builder",
            "outline.docx",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "http://localhost:8080/v1",
            "--verbose",
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.llm_model_name, "from-file");
        assert_eq!(config.llm_api_base_url, "http://localhost:8080/v1");
        assert!(config.verbose_logging);
        assert_eq!(cli.input, PathBuf::from("outline.docx"));
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["course_builder"]).is_err());
    }
}
