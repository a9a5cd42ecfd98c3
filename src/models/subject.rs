use phf::phf_map;

/// 无法识别的科目
pub const UNKNOWN_SUBJECT: &str = "unknown";

/// 英文科目名 -> 葡萄牙语科目名
static SUBJECT_TRANSLATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "History" => "História",
    "Chemistry" => "Química",
    "Geography" => "Geografia",
    "Physics" => "Física",
    "Biology" => "Biologia",
    "Sociology" => "Sociologia",
    "Philosophy" => "Filosofia",
    "Mathematics" => "Matemática",
    "Art History" => "História da Arte",
};

/// 各年份试卷的原始 PDF 地址
static SOURCE_URLS: phf::Map<u32, &'static str> = phf_map! {
    2014u32 => "https://www.curso-objetivo.br/vestibular/resolucao-comentada/unesp/2014/1fase/UNESP2014_1fase_prova.pdf",
    2015u32 => "https://www.curso-objetivo.br/vestibular/resolucao-comentada/unesp/2015/1fase/UNESP2015_1fase_prova.pdf",
    2016u32 => "https://www.curso-objetivo.br/vestibular/resolucao-comentada/unesp/2016/1fase/UNESP2016_1fase_prova.pdf",
    2017u32 => "https://www.curso-objetivo.br/vestibular/resolucao-comentada/unesp/2017/1fase/UNESP2017_1fase_prova.pdf",
};

/// 科目枚举（需要 LLM 分类的九个科目）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Subject {
    History,
    Chemistry,
    Geography,
    Physics,
    Biology,
    Sociology,
    Philosophy,
    Mathematics,
    ArtHistory,
}

impl Subject {
    pub const ALL: [Subject; 9] = [
        Subject::History,
        Subject::Chemistry,
        Subject::Geography,
        Subject::Physics,
        Subject::Biology,
        Subject::Sociology,
        Subject::Philosophy,
        Subject::Mathematics,
        Subject::ArtHistory,
    ];

    /// 英文名称（与 LLM 提示词中的候选一致）
    pub fn english_name(self) -> &'static str {
        match self {
            Subject::History => "History",
            Subject::Chemistry => "Chemistry",
            Subject::Geography => "Geography",
            Subject::Physics => "Physics",
            Subject::Biology => "Biology",
            Subject::Sociology => "Sociology",
            Subject::Philosophy => "Philosophy",
            Subject::Mathematics => "Mathematics",
            Subject::ArtHistory => "Art History",
        }
    }

    /// 葡萄牙语名称
    pub fn native_name(self) -> &'static str {
        translate_subject(self.english_name())
    }

    /// 从英文名称解析科目（精确匹配）
    pub fn from_english(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subject| subject.english_name() == s)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.english_name())
    }
}

/// 把英文科目名翻译成葡萄牙语，未知科目返回 `"unknown"`
pub fn translate_subject(english_name: &str) -> &'static str {
    SUBJECT_TRANSLATIONS
        .get(english_name)
        .copied()
        .unwrap_or(UNKNOWN_SUBJECT)
}

/// 查询某年试卷的来源地址
pub fn source_url(year: u32) -> Option<&'static str> {
    SOURCE_URLS.get(&year).copied()
}

/// 试卷开头固定科目的题目段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedSection {
    Portuguese,
    English,
}

impl FixedSection {
    /// (葡萄牙语名称, 英文名称)
    pub fn labels(self) -> (&'static str, &'static str) {
        match self {
            FixedSection::Portuguese => ("Língua Portuguesa", "Portuguese Language"),
            FixedSection::English => ("Inglês", "English"),
        }
    }

    /// 根据 0 起始的题目下标判断是否属于固定科目段
    pub fn for_index(index: usize, portuguese: usize, english: usize) -> Option<Self> {
        if index < portuguese {
            Some(FixedSection::Portuguese)
        } else if index < portuguese + english {
            Some(FixedSection::English)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_subject() {
        assert_eq!(translate_subject("Physics"), "Física");
        assert_eq!(translate_subject("Art History"), "História da Arte");
        assert_eq!(translate_subject("Astrology"), UNKNOWN_SUBJECT);
    }

    #[test]
    fn test_every_subject_has_translation() {
        for subject in Subject::ALL {
            assert_ne!(subject.native_name(), UNKNOWN_SUBJECT, "{}", subject);
            assert_eq!(Subject::from_english(subject.english_name()), Some(subject));
        }
    }

    #[test]
    fn test_fixed_sections() {
        assert_eq!(FixedSection::for_index(0, 20, 10), Some(FixedSection::Portuguese));
        assert_eq!(FixedSection::for_index(19, 20, 10), Some(FixedSection::Portuguese));
        assert_eq!(FixedSection::for_index(20, 20, 10), Some(FixedSection::English));
        assert_eq!(FixedSection::for_index(29, 20, 10), Some(FixedSection::English));
        assert_eq!(FixedSection::for_index(30, 20, 10), None);
    }

    #[test]
    fn test_source_url() {
        assert!(source_url(2016).unwrap().contains("UNESP2016"));
        assert_eq!(source_url(1999), None);
    }
}
