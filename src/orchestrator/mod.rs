//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 多年试卷处理器
//! - 管理应用生命周期（初始化、运行）
//! - 扫描年份目录，逐年顺序处理
//! - 写入每年的 prova.json，合并 data.json 和 images/
//!
//! ### `exam_processor` - 单年试卷处理器
//! - 解析答案表、切分并校验题目、拼接共享材料
//! - 遍历单年的所有题目块，复用 QuestionFlow
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<year>)
//!     ↓
//! exam_processor (处理 Vec<block>)
//!     ↓
//! workflow::QuestionFlow (处理单个题目块)
//!     ↓
//! services (能力层：llm / image_store / dataset_writer)
//!     ↓
//! parsing (纯文本处理)
//! ```

pub mod batch_processor;
pub mod exam_processor;

pub use batch_processor::{App, RunSummary};
pub use exam_processor::{process_exam, ExamStats};
