//! 答案表（gabarito）解析
//!
//! 答案文件是一个固定格式的 LaTeX 表格，每个单元格形如 `12-$\text{C}$`。

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ParseError;
use crate::models::question::{AnswerKey, AnswerLetter};

/// 表格正文的起始标记
const TABLE_DELIMITER: &str = "c|c|}\n\\hline\n";
/// 行分隔符（行尾 `\\` + 换行 + `\hline`）
const ROW_SEPARATOR: &str = " \\\\\n\\hline";
const CELL_SEPARATOR: &str = " & ";

static ANSWER_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*-\s*\\text\{\s*([A-E])\s*\}\s*$").unwrap());

/// 解析答案表，返回 题号 -> 答案字母
pub fn parse_answer_key(raw: &str) -> Result<AnswerKey, ParseError> {
    let (_, body) = raw
        .split_once(TABLE_DELIMITER)
        .ok_or(ParseError::MissingTableDelimiter)?;

    let mut rows: Vec<&str> = body.split(ROW_SEPARATOR).collect();
    // 最后一段是表格结尾（\end{tabular} 等），不含答案
    rows.pop();

    let mut key = AnswerKey::new();
    let mut expected_columns = None;

    for (row_index, row) in rows.iter().enumerate() {
        let cells: Vec<&str> = row.split(CELL_SEPARATOR).collect();

        let expected = *expected_columns.get_or_insert(cells.len());
        if cells.len() != expected {
            return Err(ParseError::RaggedTable {
                row: row_index + 1,
                expected,
                found: cells.len(),
            });
        }

        for cell in cells {
            let (question, letter) = parse_cell(cell)?;
            if key.insert(question, letter).is_some() {
                return Err(ParseError::DuplicateAnswer { question });
            }
        }
    }

    Ok(key)
}

fn parse_cell(cell: &str) -> Result<(u32, AnswerLetter), ParseError> {
    let cleaned = cell.replace("\\hline\n", "").replace('$', "");
    let malformed = || ParseError::MalformedCell {
        cell: cleaned.trim().to_string(),
    };

    let caps = ANSWER_CELL.captures(&cleaned).ok_or_else(malformed)?;
    let question = caps[1].parse::<u32>().map_err(|_| malformed())?;
    let letter = caps[2]
        .chars()
        .next()
        .and_then(AnswerLetter::from_char)
        .ok_or_else(malformed)?;

    Ok((question, letter))
}

/// 检查答案表是否恰好覆盖第 1..=expected 题
pub fn check_coverage(key: &AnswerKey, expected: usize) -> Result<(), ParseError> {
    let expected_u32 = expected as u32;
    let missing: Vec<u32> = (1..=expected_u32).filter(|q| !key.contains_key(q)).collect();
    let unexpected: Vec<u32> = key
        .keys()
        .copied()
        .filter(|q| *q == 0 || *q > expected_u32)
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(ParseError::AnswerKeyMismatch {
            expected,
            missing,
            unexpected,
        })
    }
}
