//! 题目处理上下文
//!
//! 封装"我正在处理哪一年试卷的第几题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 试卷根目录名（用于生成 file_name）
    pub exam_dir: String,

    /// 试卷年份
    pub year: u32,

    /// 题目在试卷中的题号（从1开始）
    pub question_number: u32,
}

impl QuestionCtx {
    pub fn new(exam_dir: impl Into<String>, year: u32, question_number: u32) -> Self {
        Self {
            exam_dir: exam_dir.into(),
            year,
            question_number,
        }
    }

    /// 0 起始的题目下标
    pub fn index(&self) -> usize {
        self.question_number.saturating_sub(1) as usize
    }

    /// 数据集中的 file_name 字段
    pub fn file_name(&self) -> String {
        format!("{}{}_1fase_prova", self.exam_dir, self.year)
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} 年 题目#{}]", self.year, self.question_number)
    }
}
