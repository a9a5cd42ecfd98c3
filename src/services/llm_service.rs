//! LLM 服务 - 业务能力层
//!
//! 只负责"科目分类"和"图片分类"两种能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（Gemini 的 OpenAI 兼容端点等）
//! - 图片以 base64 data URL 的形式随消息发送

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrl,
    },
    Client,
};
use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::question::{ImageImportance, ImageType};
use crate::models::subject::{Subject, UNKNOWN_SUBJECT};

static SUBJECT_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Subject:\s*(.+)").unwrap());

static IMAGE_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Category:\s*(.+)\s*\n+\s*Importance:\s*(.+)").unwrap());

/// 分类能力
///
/// 流程层只依赖这个 trait，测试时可以替换为固定返回值的实现。
#[allow(async_fn_in_trait)]
pub trait Classifier {
    /// 返回 (葡萄牙语科目名, 英文科目名)
    async fn classify_subject(&self, question_text: &str) -> AppResult<(String, String)>;

    /// 返回 (图片类型, 图片重要程度)
    async fn classify_image(
        &self,
        image_path: &Path,
        question_text: &str,
    ) -> AppResult<(ImageType, ImageImportance)>;
}

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 判断题目科目
/// - 调用 Vision API 判断图片类型和重要程度
/// - 只处理单个题目
/// - 不重试：调用失败直接向上返回
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `imgs`: 图片 URL（或 data URL）列表，会追加到用户消息中
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(&self, user_message: &str, imgs: &[String]) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符，图片 {} 张", user_message.len(), imgs.len());

        let llm_err = |e| AppError::llm_api_failed(&self.model_name, e);

        let user_msg = if imgs.is_empty() {
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()
                .map_err(llm_err)?
        } else {
            let mut content_parts = vec![ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText {
                    text: user_message.to_string(),
                },
            )];

            for url in imgs {
                content_parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(
                    ChatCompletionRequestMessageContentPartImage {
                        image_url: ImageUrl {
                            url: url.clone(),
                            detail: Some(ImageDetail::Auto),
                        },
                    },
                ));
            }

            ChatCompletionRequestUserMessageArgs::default()
                .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
                .build()
                .map_err(llm_err)?
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(0.0)
            .max_tokens(256u32)
            .build()
            .map_err(llm_err)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            llm_err(e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

impl Classifier for LlmService {
    async fn classify_subject(&self, question_text: &str) -> AppResult<(String, String)> {
        let response = self.send_to_llm(&build_subject_prompt(question_text), &[]).await?;
        Ok(parse_subject_response(&response))
    }

    async fn classify_image(
        &self,
        image_path: &Path,
        question_text: &str,
    ) -> AppResult<(ImageType, ImageImportance)> {
        let bytes = tokio::fs::read(image_path)
            .await
            .map_err(|e| AppError::file_read_failed(image_path.display().to_string(), e))?;
        let data_url = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(bytes)
        );

        let response = self
            .send_to_llm(&build_image_prompt(question_text), &[data_url])
            .await?;
        Ok(parse_image_response(&response))
    }
}

fn build_subject_prompt(question_text: &str) -> String {
    format!(
        r#"You are a subject classification assistant. Your task is to determine:

- The subject category of the question. Choose from:
  **{}.**

The question:
{}

Answer format:

Subject:
{{subject option}}"#,
        subject_candidates(),
        question_text
    )
}

/// "History, Chemistry, ... and Art History"
fn subject_candidates() -> String {
    let names: Vec<&str> = Subject::ALL.iter().map(|s| s.english_name()).collect();
    match names.split_last() {
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        None => String::new(),
    }
}

fn build_image_prompt(question_text: &str) -> String {
    format!(
        r#"You are an advanced image classification assistant. Your task is:

1. **Classify the image** into one of these categories:
   - 'graph': Data plotted on axes (line/bar charts, scatter plots, pie charts, flowcharts, etc.).
   - 'table': Structured data in rows and columns.
   - 'diagram': Schematic illustrations of processes, structures, or concepts.
   - 'scientific formula': Mathematical equations, chemical formulas, or math-related diagrams.
   - 'text': Images with mostly written content.
   - 'figure': Drawings or symbolic representations.
   - 'map': Geographical or spatial visualizations.
   - 'photo': Real-world photographic images.

2. **Determine image importance** for answering this question:
   - **Essential**: The question requires specific visual details from the image, it would be IMPOSSIBLE to answer the question without the image (i.e. only using the text).
   - **Useful**: The image only provides extra context but is not necessary to answer the question.

The question:
{}

Answer format:

Category:
{{Category}}

Importance:
{{essential or useful}}"#,
        question_text
    )
}

/// 解析科目分类响应，返回 (葡萄牙语, 英文)
pub fn parse_subject_response(response: &str) -> (String, String) {
    let subject_en = SUBJECT_ANSWER
        .captures(response)
        .map(|caps| caps[1].trim().trim_matches('*').trim().to_string())
        .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string());
    let subject_pt = Subject::from_english(&subject_en)
        .map_or(UNKNOWN_SUBJECT, Subject::native_name)
        .to_string();
    (subject_pt, subject_en)
}

/// 解析图片分类响应，格式不符时返回 (Unknown, Unknown)
pub fn parse_image_response(response: &str) -> (ImageType, ImageImportance) {
    match IMAGE_ANSWER.captures(response) {
        Some(caps) => (
            ImageType::from_label(&caps[1]),
            ImageImportance::from_label(&caps[2]),
        ),
        None => {
            warn!("无法解析图片分类响应: '{}'", response);
            (ImageType::Unknown, ImageImportance::Unknown)
        }
    }
}
