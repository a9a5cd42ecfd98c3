use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 答案字母 (A-E)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
    E,
}

impl AnswerLetter {
    /// 按字母顺序排列的全部选项
    pub const ALL: [AnswerLetter; 5] = [
        AnswerLetter::A,
        AnswerLetter::B,
        AnswerLetter::C,
        AnswerLetter::D,
        AnswerLetter::E,
    ];

    /// 字母在五选项中的位置 (A=0 .. E=4)
    pub fn index(self) -> usize {
        self as usize
    }

    /// 选项标记，例如 `(A)`
    pub fn marker(self) -> &'static str {
        match self {
            AnswerLetter::A => "(A)",
            AnswerLetter::B => "(B)",
            AnswerLetter::C => "(C)",
            AnswerLetter::D => "(D)",
            AnswerLetter::E => "(E)",
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(AnswerLetter::A),
            'B' => Some(AnswerLetter::B),
            'C' => Some(AnswerLetter::C),
            'D' => Some(AnswerLetter::D),
            'E' => Some(AnswerLetter::E),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 答案表：题号 -> 正确选项
pub type AnswerKey = BTreeMap<u32, AnswerLetter>;

/// 图片类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Graph,
    Table,
    Diagram,
    Formula,
    Text,
    Figure,
    Map,
    Photo,
    Unknown,
}

impl ImageType {
    /// 解析 LLM 返回的类别名称，无法识别时返回 `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().trim_matches('*').trim().to_lowercase().as_str() {
            "graph" => ImageType::Graph,
            "table" => ImageType::Table,
            "diagram" => ImageType::Diagram,
            "formula" | "scientific formula" => ImageType::Formula,
            "text" => ImageType::Text,
            "figure" => ImageType::Figure,
            "map" => ImageType::Map,
            "photo" => ImageType::Photo,
            _ => ImageType::Unknown,
        }
    }
}

/// 图片对解题的重要程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageImportance {
    Essential,
    Useful,
    Unknown,
}

impl ImageImportance {
    pub fn from_label(label: &str) -> Self {
        match label.trim().trim_matches('*').trim().to_lowercase().as_str() {
            "essential" => ImageImportance::Essential,
            "useful" => ImageImportance::Useful,
            _ => ImageImportance::Unknown,
        }
    }
}

/// 数据集中的一道题
///
/// `options` 总是 4 个元素（文字或图片文件名），`answer` 是正确选项在其中的下标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub language: String,
    pub country: String,
    pub file_name: String,
    pub source: String,
    pub license: String,
    pub level: String,
    pub category_en: String,
    pub category_original_lang: String,
    pub original_question_num: u32,
    #[serde(rename = "question")]
    pub question_text: String,
    pub options: Vec<String>,
    pub answer: u8,
    #[serde(rename = "image_png")]
    pub image_ref: Option<String>,
    #[serde(rename = "image_information")]
    pub image_importance: Option<ImageImportance>,
    pub image_type: Option<ImageType>,
    pub parallel_question_id: Option<String>,
}

impl Default for QuestionRecord {
    fn default() -> Self {
        Self {
            language: "pt".to_string(),
            country: "Brazil".to_string(),
            file_name: String::new(),
            source: String::new(),
            license: "Unknown".to_string(),
            level: "University Entrance".to_string(),
            category_en: String::new(),
            category_original_lang: String::new(),
            original_question_num: 0,
            question_text: String::new(),
            options: Vec::new(),
            answer: 0,
            image_ref: None,
            image_importance: None,
            image_type: None,
            parallel_question_id: None,
        }
    }
}

/// 一年的试卷及其答案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamYear {
    pub year: u32,
    pub prova: Vec<QuestionRecord>,
    pub gabarito: AnswerKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_dataset_keys() {
        let record = QuestionRecord {
            question_text: "Enunciado".to_string(),
            image_ref: Some("unesp_2017_3_fig.png".to_string()),
            image_importance: Some(ImageImportance::Essential),
            image_type: Some(ImageType::Map),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["question"], "Enunciado");
        assert_eq!(value["image_png"], "unesp_2017_3_fig.png");
        assert_eq!(value["image_information"], "essential");
        assert_eq!(value["image_type"], "map");
        assert!(value["parallel_question_id"].is_null());
    }

    #[test]
    fn test_labels_fall_back_to_unknown() {
        assert_eq!(ImageType::from_label("Scientific Formula"), ImageType::Formula);
        assert_eq!(ImageType::from_label("**photo**"), ImageType::Photo);
        assert_eq!(ImageType::from_label("cartoon"), ImageType::Unknown);
        assert_eq!(ImageImportance::from_label("Useful"), ImageImportance::Useful);
        assert_eq!(ImageImportance::from_label("maybe"), ImageImportance::Unknown);
    }
}
