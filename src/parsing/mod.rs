//! 解析层（纯文本处理）
//!
//! 所有函数只接受和返回文本或结构化数据，不访问文件系统和网络。
//!
//! 处理顺序：
//! ```text
//! normalizer → segmenter → validator → support_text → alternatives / images
//! ```

pub mod alternatives;
pub mod answer_key;
pub mod images;
pub mod normalizer;
pub mod segmenter;
pub mod support_text;
pub mod validator;

pub use alternatives::{extract_alternatives, reduce_to_four, split_stem};
pub use answer_key::{check_coverage, parse_answer_key};
pub use normalizer::{document_body, normalize};
pub use segmenter::{segment, Segmentation};
pub use support_text::{link_support_text, SupportRange};
pub use validator::{validate, ValidationReport};
