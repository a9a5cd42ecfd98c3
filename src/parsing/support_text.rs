//! 共享材料关联
//!
//! 一段阅读材料可以被连续几道题共用，材料前的引导语形如
//! "Leia o texto para responder às questões 03 a 05."。
//! 引导语之后的文本会被原样拼接到范围内每道题的开头。

use regex::{Match, Regex};
use std::sync::LazyLock;

use crate::error::StructureError;

static TRIGGER_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLeia\b.*?responder às questões.*?\.").unwrap());

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[0-9]+\b").unwrap());

/// 当前生效的共享材料范围
///
/// 同一时刻最多只有一个范围生效，发现新的引导语会直接替换旧范围。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SupportRange {
    #[default]
    Inactive,
    Active {
        passage: String,
        /// 范围内最后一道题的题号（1 起始）
        end: u32,
    },
}

/// 查找引导语
pub fn find_trigger(text: &str) -> Option<Match<'_>> {
    TRIGGER_SENTENCE.find(text)
}

/// 从引导语中读出范围的最后一题
///
/// 在句子的所有数字中找到第一个等于 `anchor` 的数字，返回紧随其后的那个数字。
pub fn range_terminal(sentence: &str, anchor: u32) -> Result<u32, StructureError> {
    let numbers: Vec<u32> = NUMBER
        .find_iter(sentence)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    numbers
        .iter()
        .position(|n| *n == anchor)
        .and_then(|pos| numbers.get(pos + 1))
        .copied()
        .filter(|end| *end >= anchor)
        .ok_or_else(|| StructureError::UnresolvedSupportRange {
            anchor,
            sentence: sentence.to_string(),
        })
}

/// 根据第一个标题之前的文本确定初始状态
pub fn open_from_leading(leading_passage: &str) -> Result<SupportRange, StructureError> {
    match find_trigger(leading_passage) {
        Some(trigger) => Ok(SupportRange::Active {
            passage: leading_passage[trigger.end()..].to_string(),
            end: range_terminal(trigger.as_str(), 1)?,
        }),
        None => Ok(SupportRange::Inactive),
    }
}

/// 处理第 `question` 题（1 起始），返回关联后的文本和下一个状态
///
/// 若块内含有新的引导语，块在引导语处截断（已拼接的材料保留），
/// 引导语之后的文本成为第 `question + 1` 题起的新材料。
pub fn step(
    state: SupportRange,
    question: u32,
    block: &str,
) -> Result<(String, SupportRange), StructureError> {
    let (mut linked, mut next) = match state {
        SupportRange::Active { passage, end } => {
            let linked = format!("{}{}", passage, block);
            let next = if question == end {
                SupportRange::Inactive
            } else {
                SupportRange::Active { passage, end }
            };
            (linked, next)
        }
        SupportRange::Inactive => (block.to_string(), SupportRange::Inactive),
    };

    if let Some(trigger) = find_trigger(block) {
        let prefix_len = linked.len() - block.len();
        linked.truncate(prefix_len + trigger.start());
        next = SupportRange::Active {
            passage: block[trigger.end()..].to_string(),
            end: range_terminal(trigger.as_str(), question + 1)?,
        };
    }

    Ok((linked, next))
}

/// 把共享材料拼接到所有相关题目块上（原地修改）
pub fn link_support_text(
    leading_passage: &str,
    blocks: &mut [String],
) -> Result<(), StructureError> {
    let mut state = open_from_leading(leading_passage)?;

    for (index, block) in blocks.iter_mut().enumerate() {
        let (linked, next) = step(state, index as u32 + 1, block)?;
        *block = linked;
        state = next;
    }

    Ok(())
}
