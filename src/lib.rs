//! # Exam LaTeX Parser
//!
//! 把多年份的 LaTeX 试卷（题目 + 答案表）转换为结构化的 JSON 题目数据集
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 解析层（Parsing）
//! - `parsing/` - 纯文本处理，不访问文件和网络
//! - 文本修正、答案表解析、题目切分、共享材料关联、结构校验、选项提取、图片定位
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个题目
//! - `LlmService` - 科目分类和图片分类能力（实现 `Classifier`）
//! - `ImageStore` - 图片放置与合并能力
//! - `DatasetWriter` - 写 JSON 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `QuestionCtx` - 上下文封装（year + question_number）
//! - `QuestionFlow` - 流程编排（题干 → 选项 → 科目 → 图片分类）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 逐年处理并合并数据集
//! - `orchestrator/exam_processor` - 单年处理器，遍历题目块
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod parsing;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::question::{ExamYear, QuestionRecord};
pub use orchestrator::{process_exam, App};
pub use services::{Classifier, LlmService};
pub use workflow::{QuestionCtx, QuestionFlow};
