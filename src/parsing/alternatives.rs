//! 选项提取
//!
//! 从题目块中取出 (A)-(E) 五个选项，再按正确答案裁剪为四个选项。

use regex::Regex;
use std::sync::LazyLock;

use crate::error::StructureError;
use crate::models::question::AnswerLetter;

static ALTERNATIVE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-E])\)").unwrap());

/// 四选项格式中最后一个位置
const LAST_OPTION_INDEX: u8 = 3;

/// 题干：第一个 `(A)` 之前的文本
pub fn split_stem(block: &str) -> &str {
    block
        .split_once(AnswerLetter::A.marker())
        .map_or(block, |(stem, _)| stem)
        .trim()
}

/// 提取五个选项，按 A-E 顺序返回
///
/// 每个选项从标记之后一直到下一个标记或文本结尾；同一字母出现多次时以最后一次为准。
pub fn extract_alternatives(
    block: &str,
    question: usize,
) -> Result<[String; 5], StructureError> {
    let markers: Vec<_> = ALTERNATIVE_MARKER.captures_iter(block).collect();
    let mut found: [Option<String>; 5] = Default::default();

    for (i, caps) in markers.iter().enumerate() {
        let (Some(whole), Some(letter)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(block.len(), |next| next.start());
        let content = block[whole.end()..end].trim().to_string();

        if let Some(letter) = letter.as_str().chars().next().and_then(AnswerLetter::from_char) {
            found[letter.index()] = Some(content);
        }
    }

    let missing = || StructureError::MissingAlternatives {
        questions: vec![question],
    };
    let [a, b, c, d, e] = found;
    Ok([
        a.ok_or_else(missing)?,
        b.ok_or_else(missing)?,
        c.ok_or_else(missing)?,
        d.ok_or_else(missing)?,
        e.ok_or_else(missing)?,
    ])
}

/// 裁剪为四个选项，返回 (选项, 正确答案下标)
///
/// 答案不是 E 时去掉 E，下标就是字母位置；答案是 E 时去掉 A，下标固定为 3。
pub fn reduce_to_four(alternatives: [String; 5], correct: AnswerLetter) -> ([String; 4], u8) {
    let [a, b, c, d, e] = alternatives;
    match correct {
        AnswerLetter::E => ([b, c, d, e], LAST_OPTION_INDEX),
        letter => ([a, b, c, d], letter.index() as u8),
    }
}
