//! 题目切分
//!
//! 用题目标题标记 `QUESTÃO` 把整份试卷切成固定数量的题目块。

use crate::error::StructureError;

/// 规范的题目标题标记
pub const QUESTION_MARKER: &str = "QUESTÃO";

/// OCR 转换中常见的标题错误拼写，按顺序替换为规范写法
const CORRUPTED_MARKERS: [&str; 7] = [
    "QUESTAO",
    "QUESTATO",
    "QUESTȦO",
    "QUESTÃ0",
    "QUESTĀO",
    "Questāo",
    "Questão",
];

/// 切分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// 第一个标题之前的文本（可能包含共享材料）
    pub leading_passage: String,
    /// 每道题的原始文本块，已去掉标题所在行
    pub blocks: Vec<String>,
}

/// 把所有错误拼写的标题替换为 `QUESTÃO`
pub fn canonicalize_markers(text: &str) -> String {
    CORRUPTED_MARKERS
        .iter()
        .fold(text.to_string(), |acc, corrupted| acc.replace(corrupted, QUESTION_MARKER))
}

/// 切分试卷，题目数量必须恰好等于 `expected`
pub fn segment(normalized: &str, expected: usize) -> Result<Segmentation, StructureError> {
    let canonical = canonicalize_markers(normalized);
    let mut parts = canonical.split(QUESTION_MARKER);

    let leading_passage = parts.next().unwrap_or_default().to_string();
    let blocks: Vec<String> = parts.map(drop_heading_line).collect();

    if blocks.len() != expected {
        return Err(StructureError::QuestionCount {
            expected,
            found: blocks.len(),
        });
    }

    Ok(Segmentation {
        leading_passage,
        blocks,
    })
}

/// 去掉块的第一行（标题后的题号）；没有换行时原样保留
fn drop_heading_line(part: &str) -> String {
    match part.split_once('\n') {
        Some((_, rest)) => rest.to_string(),
        None => part.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_splits_and_drops_number_line() {
        let text = "Instruções\nQUESTÃO 01\nPrimeira\nQUESTAO 02\nSegunda\nQuestão 03\nTerceira";
        let seg = segment(text, 3).unwrap();
        assert_eq!(seg.leading_passage, "Instruções\n");
        assert_eq!(seg.blocks, vec!["Primeira\n", "Segunda\n", "Terceira"]);
    }

    #[test]
    fn test_all_corrupted_spellings_are_recognised() {
        let text = CORRUPTED_MARKERS
            .iter()
            .map(|m| format!("{} x\ncorpo\n", m))
            .collect::<String>();
        let seg = segment(&text, CORRUPTED_MARKERS.len()).unwrap();
        assert!(seg.blocks.iter().all(|b| b == "corpo\n"));
    }

    #[test]
    fn test_wrong_count_is_fatal() {
        let text = "QUESTÃO 1\na\nQUESTÃO 2\nb";
        assert_eq!(
            segment(text, 90).unwrap_err(),
            StructureError::QuestionCount { expected: 90, found: 2 }
        );
    }

    #[test]
    fn test_block_without_newline_is_kept() {
        let seg = segment("QUESTÃO 1", 1).unwrap();
        assert_eq!(seg.blocks, vec![" 1"]);
    }
}
