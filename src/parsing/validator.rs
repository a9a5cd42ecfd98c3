//! 结构校验
//!
//! 在接受一份试卷之前必须全部通过的一组检查。题号均为 1 起始。

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::error::StructureError;
use crate::models::question::AnswerLetter;
use crate::parsing::images::IMAGE_REFERENCE;

const TABLE_BEGIN: &str = "\\begin{tabular}";
const IMAGE_COMMAND: &str = "\\includegraphics";

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// 非致命检查的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// 选项 (E) 之后仍有文字的题目（可能是没有被关联的共享材料）
    pub trailing_text: Vec<usize>,
}

/// 依次执行全部检查，任一致命检查失败即返回错误
pub fn validate(blocks: &[String]) -> Result<ValidationReport, StructureError> {
    check_tables(blocks)?;
    check_stem_images(blocks)?;
    check_mixed_alternatives(blocks)?;
    check_all_alternatives_present(blocks)?;

    let trailing_text = offending(blocks, has_text_after_last_alternative);
    if !trailing_text.is_empty() {
        warn!("⚠️ 以下题目在 (E) 选项之后仍有文字（可能需要修正）: {:?}", trailing_text);
        warn!("如果确实是共享材料，请确保引导语以 'Leia' 开头，否则可以忽略");
    }

    Ok(ValidationReport { trailing_text })
}

/// 表格必须预先转换为图片
pub fn check_tables(blocks: &[String]) -> Result<(), StructureError> {
    let questions = offending(blocks, |b| b.contains(TABLE_BEGIN));
    if questions.is_empty() {
        Ok(())
    } else {
        Err(StructureError::TableFound { questions })
    }
}

/// 题干（第一个 `(A)` 之前）最多一张图片
pub fn check_stem_images(blocks: &[String]) -> Result<(), StructureError> {
    let questions = offending(blocks, |b| stem_region(b).matches(IMAGE_COMMAND).count() > 1);
    if questions.is_empty() {
        Ok(())
    } else {
        Err(StructureError::MultipleImages { questions })
    }
}

/// 选项不能同时包含文字和图片
pub fn check_mixed_alternatives(blocks: &[String]) -> Result<(), StructureError> {
    let questions = offending(blocks, |b| mixes_text_and_image(first_alternative_region(b)));
    if questions.is_empty() {
        Ok(())
    } else {
        Err(StructureError::MixedAlternative { questions })
    }
}

/// 五个选项标记都必须出现
pub fn check_all_alternatives_present(blocks: &[String]) -> Result<(), StructureError> {
    let questions = offending(blocks, |b| {
        AnswerLetter::ALL.iter().any(|letter| !b.contains(letter.marker()))
    });
    if questions.is_empty() {
        Ok(())
    } else {
        Err(StructureError::MissingAlternatives { questions })
    }
}

/// `(E)` 所在行之后是否还有非空白内容
pub fn has_text_after_last_alternative(block: &str) -> bool {
    block
        .split_once(AnswerLetter::E.marker())
        .and_then(|(_, after)| after.split_once('\n'))
        .is_some_and(|(_, rest)| !rest.trim().is_empty())
}

fn offending(blocks: &[String], predicate: impl Fn(&str) -> bool) -> Vec<usize> {
    blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| predicate(block))
        .map(|(index, _)| index + 1)
        .collect()
}

fn stem_region(block: &str) -> &str {
    block
        .split_once(AnswerLetter::A.marker())
        .map_or(block, |(stem, _)| stem)
}

/// 最后一个 `(A)` 之后、下一个 `(B)` 之前的文本
fn first_alternative_region(block: &str) -> &str {
    let after_a = block
        .rsplit_once(AnswerLetter::A.marker())
        .map_or(block, |(_, after)| after);
    after_a
        .split_once(AnswerLetter::B.marker())
        .map_or(after_a, |(region, _)| region)
}

/// 图片引用之前出现了普通单词（不是 `\command`）
fn mixes_text_and_image(region: &str) -> bool {
    let Some(last_image) = IMAGE_REFERENCE.find_iter(region).last() else {
        return false;
    };
    let before = &region[..last_image.start()];
    WORD.find_iter(before)
        .any(|word| !before[..word.start()].ends_with('\\'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(body: &str) -> String {
        format!("{}\n(A) um\n(B) dois\n(C) três\n(D) quatro\n(E) cinco\n", body)
    }

    #[test]
    fn test_valid_blocks_pass() {
        let blocks = vec![block("Enunciado"), block("Outro \\includegraphics[width=3cm]{fig}")];
        let report = validate(&blocks).unwrap();
        assert!(report.trailing_text.is_empty());
    }

    #[test]
    fn test_table_is_always_fatal() {
        let blocks = vec![
            block("ok"),
            "\\begin{tabular}{cc} a & b \\end{tabular}".to_string(),
        ];
        assert_eq!(
            validate(&blocks).unwrap_err(),
            StructureError::TableFound { questions: vec![2] }
        );
    }

    #[test]
    fn test_missing_d_is_fatal() {
        let blocks = vec![block("ok").replace("(D)", "D)")];
        assert_eq!(
            validate(&blocks).unwrap_err(),
            StructureError::MissingAlternatives { questions: vec![1] }
        );
    }

    #[test]
    fn test_two_stem_images_are_fatal() {
        let stem = "\\includegraphics{a}\n\\includegraphics{b}";
        assert_eq!(
            check_stem_images(&[block(stem)]).unwrap_err(),
            StructureError::MultipleImages { questions: vec![1] }
        );
        // 选项中的图片不计入题干
        let images_in_options = "Enunciado\n(A) \\includegraphics{a}\n(B) \\includegraphics{b}\n";
        assert!(check_stem_images(&[images_in_options.to_string()]).is_ok());
    }

    #[test]
    fn test_mixed_alternative() {
        let mixed = "Enunciado\n(A) Figura \\includegraphics[width=2cm]{a}\n(B) x";
        assert_eq!(
            check_mixed_alternatives(&[mixed.to_string()]).unwrap_err(),
            StructureError::MixedAlternative { questions: vec![1] }
        );
        let image_only = "Enunciado\n(A) \\includegraphics[width=0.3\\textwidth]{a}\n(B) x";
        assert!(check_mixed_alternatives(&[image_only.to_string()]).is_ok());
    }

    #[test]
    fn test_text_after_e_only_warns() {
        let blocks = vec![format!("{}Texto solto", block("Enunciado"))];
        let report = validate(&blocks).unwrap();
        assert_eq!(report.trailing_text, vec![1]);
        assert!(!has_text_after_last_alternative("(E) última\n   \n"));
    }
}
