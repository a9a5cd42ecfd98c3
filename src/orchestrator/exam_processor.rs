//! 单年试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理一年试卷的全部题目，是年份级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **答案表**：解析 gabarito 并检查是否覆盖全部题号
//! 2. **预处理与切分**：正文提取 → 文本修正 → 按标题切分
//! 3. **结构校验**：任一致命检查失败，整年中止
//! 4. **共享材料**：把阅读材料拼接到相关题目
//! 5. **逐题处理**：委托 `QuestionFlow`，严格按题号顺序

use tracing::info;

use crate::config::Config;
use crate::error::{AppResult, ParseError};
use crate::models::loaders::ExamSources;
use crate::models::question::ExamYear;
use crate::models::subject::FixedSection;
use crate::parsing::{
    check_coverage, document_body, link_support_text, normalize, parse_answer_key, segment,
    validate,
};
use crate::services::Classifier;
use crate::workflow::{QuestionCtx, QuestionFlow};

/// 单年处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExamStats {
    pub questions: usize,
    pub classified: usize,
    pub with_images: usize,
    pub trailing_text_warnings: usize,
}

/// 处理一年的试卷，返回该年的全部题目和答案表
pub async fn process_exam<C: Classifier>(
    flow: &QuestionFlow<C>,
    sources: &ExamSources,
    exam_dir: &str,
    config: &Config,
) -> AppResult<(ExamYear, ExamStats)> {
    let gabarito = parse_answer_key(&sources.gabarito)?;
    check_coverage(&gabarito, config.expected_questions)?;
    info!("[{} 年] ✓ 答案表解析完成: {} 题", sources.year, gabarito.len());

    let normalized = normalize(document_body(&sources.prova));
    let segmentation = segment(&normalized, config.expected_questions)?;
    let report = validate(&segmentation.blocks)?;
    info!("[{} 年] ✓ 切分并校验 {} 道题", sources.year, segmentation.blocks.len());

    let mut blocks = segmentation.blocks;
    link_support_text(&segmentation.leading_passage, &mut blocks)?;

    let mut stats = ExamStats {
        trailing_text_warnings: report.trailing_text.len(),
        ..Default::default()
    };
    let mut prova = Vec::with_capacity(blocks.len());

    for (index, block) in blocks.iter().enumerate() {
        let question_number = index as u32 + 1;
        let ctx = QuestionCtx::new(exam_dir, sources.year, question_number);
        let correct = gabarito.get(&question_number).copied().ok_or_else(|| {
            ParseError::AnswerKeyMismatch {
                expected: config.expected_questions,
                missing: vec![question_number],
                unexpected: Vec::new(),
            }
        })?;

        let record = flow.run(block, correct, &ctx).await?;

        stats.questions += 1;
        if FixedSection::for_index(index, config.portuguese_questions, config.english_questions)
            .is_none()
        {
            stats.classified += 1;
        }
        if record.image_ref.is_some() {
            stats.with_images += 1;
        }
        prova.push(record);
    }

    Ok((
        ExamYear {
            year: sources.year,
            prova,
            gabarito,
        },
        stats,
    ))
}
