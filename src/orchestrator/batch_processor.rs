//! 多年试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责所有年份的处理和输出。
//!
//! ## 核心功能
//!
//! 1. **扫描年份**：找到根目录下所有包含 prova.tex / gabarito.tex 的年份目录
//! 2. **逐年处理**：严格顺序执行，任何一年出错立即中止整个运行
//! 3. **写入结果**：每年写 `{year}/prova.json`
//! 4. **合并数据集**：拼接为 `data.json`，并把各年 new_images 合并到 `images/`
//!
//! ## 设计特点
//!
//! - **单线程顺序执行**：不使用并发，LLM 调用逐个等待
//! - **资源所有者**：持有 QuestionFlow（及其中的 LLM 客户端和图片存储）
//! - **向下委托**：委托 exam_processor 处理单个年份

use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::loaders::{list_exam_years, load_exam_sources};
use crate::orchestrator::exam_processor::process_exam;
use crate::services::{Classifier, DatasetWriter, ImageStore, LlmService};
use crate::utils::logging::{
    log_startup, log_year_complete, log_year_start, log_years_found, print_final_stats,
};
use crate::workflow::QuestionFlow;

/// 运行结果统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub years: Vec<u32>,
    pub questions: usize,
    pub merged_images: usize,
}

/// 应用主结构
pub struct App<C: Classifier> {
    config: Config,
    prova_dir: PathBuf,
    exam_dir: String,
    flow: QuestionFlow<C>,
    writer: DatasetWriter,
}

impl App<LlmService> {
    /// 使用 LLM 分类服务初始化应用
    pub fn initialize(config: Config, prova_dir: impl Into<PathBuf>) -> Self {
        let classifier = LlmService::new(&config);
        Self::with_classifier(config, prova_dir, classifier)
    }
}

impl<C: Classifier> App<C> {
    /// 使用自定义分类器初始化应用
    pub fn with_classifier(config: Config, prova_dir: impl Into<PathBuf>, classifier: C) -> Self {
        let prova_dir = prova_dir.into();
        let exam_dir = prova_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let image_store = ImageStore::new(&prova_dir, config.legacy_jpg_prefix.clone());
        let flow = QuestionFlow::new(&config, classifier, image_store);
        let writer = DatasetWriter::new(&prova_dir);

        Self {
            config,
            prova_dir,
            exam_dir,
            flow,
            writer,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunSummary> {
        log_startup(
            &self.prova_dir.display().to_string(),
            self.config.expected_questions,
        );

        let years = list_exam_years(&self.prova_dir).await?;
        if years.is_empty() {
            warn!("⚠️ 没有找到待处理的年份目录，程序结束");
            return Ok(RunSummary::default());
        }
        log_years_found(&years);

        let mut summary = RunSummary {
            years: years.clone(),
            ..Default::default()
        };

        for year in &years {
            log_year_start(*year);

            let sources = load_exam_sources(&self.prova_dir, *year).await?;
            let (exam, stats) =
                process_exam(&self.flow, &sources, &self.exam_dir, &self.config).await?;

            let path = self.writer.write_year(exam.year, &exam.prova)?;
            info!("[{} 年] ✓ 已写入 {}", year, path.display());

            summary.questions += stats.questions;
            log_year_complete(
                *year,
                stats.questions,
                stats.classified,
                stats.with_images,
                stats.trailing_text_warnings,
            );
        }

        self.writer.merge(&years)?;
        for year in &years {
            summary.merged_images += self.flow.image_store().merge_year_images(*year)?;
        }

        print_final_stats(
            years.len(),
            summary.questions,
            &self
                .prova_dir
                .join(crate::services::dataset_writer::MERGED_FILE)
                .display()
                .to_string(),
        );

        Ok(summary)
    }
}
