use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认配置文件名
const DEFAULT_CONFIG_FILE: &str = "exam_parser.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 每年试卷应有的题目数量
    pub expected_questions: usize,
    /// 以此前缀开头的图片文件名使用 .jpg 扩展名
    pub legacy_jpg_prefix: String,
    /// 前 N 道题固定为葡萄牙语
    pub portuguese_questions: usize,
    /// 葡萄牙语之后的 N 道题固定为英语
    pub english_questions: usize,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expected_questions: 90,
            legacy_jpg_prefix: "2025".to_string(),
            portuguese_questions: 20,
            english_questions: 10,
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-1.5-flash-8b".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：先读 TOML 文件（如果存在），再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("EXAM_PARSER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let base = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        base.with_env_overrides()
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            }
            .into()
        })
    }

    fn with_env_overrides(self) -> AppResult<Self> {
        Ok(Self {
            expected_questions: env_parse("EXPECTED_QUESTIONS", self.expected_questions)?,
            legacy_jpg_prefix: std::env::var("LEGACY_JPG_PREFIX").unwrap_or(self.legacy_jpg_prefix),
            portuguese_questions: env_parse("PORTUGUESE_QUESTIONS", self.portuguese_questions)?,
            english_questions: env_parse("ENGLISH_QUESTIONS", self.english_questions)?,
            llm_api_key: std::env::var("LLM_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
        })
    }
}

/// 读取并解析数值型环境变量，未设置时返回默认值
fn env_parse(var_name: &str, default: usize) -> AppResult<usize> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: "usize".to_string(),
            }
            .into()
        }),
        Err(_) => Ok(default),
    }
}
