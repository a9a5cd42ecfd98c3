//! 题目处理流程 - 流程层
//!
//! 核心职责：把"一道题"的原始文本块变成数据集记录
//!
//! 流程顺序：
//! 1. 题干 → 题干图片（放置到 new_images）
//! 2. 五个选项 → 按答案裁剪为四个 → 图片选项
//! 3. 科目（固定段落或 LLM 分类）
//! 4. 图片类型和重要程度（LLM 分类）

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, StructureError};
use crate::models::question::{AnswerLetter, QuestionRecord};
use crate::models::subject::{source_url, FixedSection};
use crate::parsing::alternatives::{extract_alternatives, reduce_to_four, split_stem};
use crate::parsing::images::{find_image_reference, referenced_name};
use crate::services::{Classifier, ImageStore};
use crate::utils::logging::truncate_text;
use crate::workflow::question_ctx::QuestionCtx;

/// 题目处理流程
///
/// - 只处理单个题目块
/// - 不持有其他题目的状态（共享材料已在解析层拼接好）
/// - 只依赖业务能力（services）
pub struct QuestionFlow<C: Classifier> {
    classifier: C,
    image_store: ImageStore,
    portuguese_questions: usize,
    english_questions: usize,
}

impl<C: Classifier> QuestionFlow<C> {
    pub fn new(config: &Config, classifier: C, image_store: ImageStore) -> Self {
        Self {
            classifier,
            image_store,
            portuguese_questions: config.portuguese_questions,
            english_questions: config.english_questions,
        }
    }

    pub fn image_store(&self) -> &ImageStore {
        &self.image_store
    }

    pub async fn run(
        &self,
        block: &str,
        correct: AnswerLetter,
        ctx: &QuestionCtx,
    ) -> AppResult<QuestionRecord> {
        let (question_text, image_ref) = self.separate_stem_and_image(block, ctx)?;
        info!("{} 题干: {}", ctx, truncate_text(&question_text, 80));

        let alternatives = extract_alternatives(block, ctx.question_number as usize)?;
        let (options, answer) = reduce_to_four(alternatives, correct);
        let options = self.relocate_image_options(options, ctx)?;

        let (category_original_lang, category_en) = match FixedSection::for_index(
            ctx.index(),
            self.portuguese_questions,
            self.english_questions,
        ) {
            Some(section) => {
                let (pt, en) = section.labels();
                (pt.to_string(), en.to_string())
            }
            None => self.classifier.classify_subject(&question_text).await?,
        };
        debug!("{} 科目: {} / {}", ctx, category_original_lang, category_en);

        let (image_type, image_importance) = match &image_ref {
            Some(file_name) => {
                let path = self.image_store.placed_image_path(ctx.year, file_name);
                let (kind, importance) = self.classifier.classify_image(&path, &question_text).await?;
                (Some(kind), Some(importance))
            }
            None => (None, None),
        };

        let source = match source_url(ctx.year) {
            Some(url) => url.to_string(),
            None => {
                warn!("{} ⚠️ 没有该年份的来源地址，source 字段留空", ctx);
                String::new()
            }
        };

        Ok(QuestionRecord {
            file_name: ctx.file_name(),
            source,
            category_en,
            category_original_lang,
            original_question_num: ctx.question_number,
            question_text,
            options: options.into(),
            answer,
            image_ref,
            image_importance,
            image_type,
            ..Default::default()
        })
    }

    /// 题干文本和题干图片（图片引用从文本中移除）
    fn separate_stem_and_image(
        &self,
        block: &str,
        ctx: &QuestionCtx,
    ) -> AppResult<(String, Option<String>)> {
        let stem = split_stem(block);
        let Some(reference) = find_image_reference(stem) else {
            return Ok((stem.to_string(), None));
        };

        let text = stem.replace(reference, "").trim().to_string();
        let image = match referenced_name(reference) {
            Some(name) => Some(self.image_store.relocate(ctx.year, ctx.question_number, name)?),
            None => None,
        };
        Ok((text, image))
    }

    /// 首个选项是图片时，所有选项都替换为放置后的图片文件名
    fn relocate_image_options(
        &self,
        options: [String; 4],
        ctx: &QuestionCtx,
    ) -> AppResult<[String; 4]> {
        if find_image_reference(&options[0]).is_none() {
            return Ok(options);
        }

        let mut relocated: [String; 4] = Default::default();
        for (i, option) in options.iter().enumerate() {
            let name = find_image_reference(option)
                .and_then(referenced_name)
                .ok_or(StructureError::InconsistentImageAlternatives {
                    question: ctx.question_number as usize,
                    option: i + 1,
                })?;
            relocated[i] = self
                .image_store
                .relocate(ctx.year, ctx.question_number, name)?;
        }
        Ok(relocated)
    }
}
