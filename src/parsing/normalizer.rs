//! 文本预处理
//!
//! 在切分题目之前，对原始 LaTeX 做一组固定顺序的文本修正。

use regex::Regex;
use std::sync::LazyLock;

static SECTION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\section\*\{(.*?)\}").unwrap());

// 数字后面跟着被错误识别的序数符号
static BROKEN_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)[o@응ㅇ]").unwrap());

const BEGIN_DOCUMENT: &str = "\\begin{document}";
const END_DOCUMENT: &str = "\\end{document}";

/// 提取 `\begin{document}` 之后的正文，并去掉结尾的 `\end{document}`
pub fn document_body(raw: &str) -> &str {
    let body = match raw.rfind(BEGIN_DOCUMENT) {
        Some(pos) => &raw[pos + BEGIN_DOCUMENT.len()..],
        None => raw,
    };

    body.strip_suffix(&format!("\n\n\n{}", END_DOCUMENT))
        .or_else(|| body.trim_end().strip_suffix(END_DOCUMENT))
        .unwrap_or(body)
}

/// 按固定顺序应用所有文本修正
pub fn normalize(raw: &str) -> String {
    let text = remove_font_markers(raw);
    let text = remove_section_tags(&text);
    let text = strip_itemize(&text);
    let text = strip_enumerate(&text);
    let text = strip_center(&text);
    let text = collapse_latex_breaklines(&text);
    let text = collapse_double_hyphens(&text);
    fix_ordinals(&text)
}

fn remove_font_markers(text: &str) -> String {
    text.replace("[0pt]", "")
}

fn remove_section_tags(text: &str) -> String {
    SECTION_TAG.replace_all(text, "$1").into_owned()
}

/// itemize 的每个条目变成以 `-` 开头的行
fn strip_itemize(text: &str) -> String {
    text.replace("\\begin{itemize}", "")
        .replace("\\end{itemize}", "")
        .replace("  \\item", "-")
}

fn strip_enumerate(text: &str) -> String {
    text.replace("\\begin{enumerate}", "")
        .replace("\\end{enumerate}", "")
}

fn strip_center(text: &str) -> String {
    text.replace("\\begin{center}", "")
        .replace("\\end{center}", "")
}

fn collapse_latex_breaklines(text: &str) -> String {
    text.replace("\\\\\n", "\n")
}

fn collapse_double_hyphens(text: &str) -> String {
    text.replace("--", "-")
}

fn fix_ordinals(text: &str) -> String {
    BROKEN_ORDINAL.replace_all(text, "${1}º").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_ordinals() {
        assert_eq!(fix_ordinals("1o, 2@, 3응, 4ㅇ, and 5."), "1º, 2º, 3º, 4º, and 5.");
    }

    #[test]
    fn test_section_tags_keep_title() {
        assert_eq!(remove_section_tags("\\section*{QUESTÃO 1}\nTexto"), "QUESTÃO 1\nTexto");
    }

    #[test]
    fn test_itemize_becomes_dashes() {
        let text = "\\begin{itemize}\n  \\item um\n  \\item dois\n\\end{itemize}";
        assert_eq!(strip_itemize(text), "\n- um\n- dois\n");
    }

    #[test]
    fn test_normalize_applies_all_steps() {
        let raw = "[0pt]\\section*{QUESTÃO 01}\n\\begin{center}\nlinha\\\\\nfim -- 2o lugar\n\\end{center}";
        assert_eq!(normalize(raw), "QUESTÃO 01\n\nlinha\nfim - 2º lugar\n");
    }

    #[test]
    fn test_document_body() {
        let raw = "\\documentclass{article}\n\\begin{document}\ncorpo\n\n\n\\end{document}";
        assert_eq!(document_body(raw), "\ncorpo");
        assert_eq!(document_body("sem preambulo"), "sem preambulo");
    }
}
