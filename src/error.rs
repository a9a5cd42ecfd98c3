use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 试卷结构错误（需要人工修正 .tex 源文件）
    #[error("结构错误: {0}")]
    Structure(#[from] StructureError),
    /// 答案表解析错误
    #[error("答案解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 图片处理错误
    #[error("图片错误: {0}")]
    Image(#[from] ImageError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 试卷结构错误
///
/// 所有变体都是致命的：当年的处理立即中止，必须先修正源文件。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    /// 题目数量与预期不符
    #[error("应有 {expected} 道题，实际找到 {found} 道，请先修正 .tex 文件")]
    QuestionCount { expected: usize, found: usize },
    /// 题目中含有 tabular 表格（应预先转换为图片）
    #[error("以下题目含有表格，需要修正: {questions:?}")]
    TableFound { questions: Vec<usize> },
    /// 题干中含有多张图片
    #[error("以下题目题干含有多张图片，需要修正: {questions:?}")]
    MultipleImages { questions: Vec<usize> },
    /// 选项同时含有文字和图片
    #[error("以下题目的选项同时含有文字和图片，需要修正: {questions:?}")]
    MixedAlternative { questions: Vec<usize> },
    /// 缺少 (A)-(E) 选项标记
    #[error("以下题目选项标记不完整，需要修正: {questions:?}")]
    MissingAlternatives { questions: Vec<usize> },
    /// 图片选项结构不一致（首个选项是图片，其余选项不是）
    #[error("题目 {question} 的图片选项不一致: 选项 {option} 没有图片引用")]
    InconsistentImageAlternatives { question: usize, option: usize },
    /// 无法从引导语中确定共享材料的题号范围
    #[error("无法从引导语中确定题号范围 (起始题号 {anchor}): {sentence}")]
    UnresolvedSupportRange { anchor: u32, sentence: String },
}

/// 答案表解析错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// 找不到表格起始标记
    #[error("答案文件中找不到表格起始标记")]
    MissingTableDelimiter,
    /// 单元格格式不符合 `<题号>-\text{<字母>}`
    #[error("答案单元格格式错误: '{cell}'")]
    MalformedCell { cell: String },
    /// 行的列数与首行不一致
    #[error("答案表第 {row} 行有 {found} 列，首行有 {expected} 列")]
    RaggedTable { row: usize, expected: usize, found: usize },
    /// 同一题号出现多次
    #[error("答案表中题号 {question} 重复")]
    DuplicateAnswer { question: u32 },
    /// 答案表与题目数量不匹配
    #[error("答案表应覆盖第 1-{expected} 题，缺少: {missing:?}，多余: {unexpected:?}")]
    AnswerKeyMismatch {
        expected: usize,
        missing: Vec<u32>,
        unexpected: Vec<u32>,
    },
}

/// 图片处理错误
#[derive(Debug, Error)]
pub enum ImageError {
    /// 不支持的图片格式
    #[error("不支持的图片格式: {path}（只支持 .png 和 .jpg）")]
    UnsupportedFormat { path: String },
    /// 图片读取或保存失败
    #[error("图片转换失败 ({path}): {source}")]
    ConvertFailed {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// JSON 序列化/反序列化失败
    #[error("JSON处理失败 ({path}): {source}")]
    JsonFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: async_openai::error::OpenAIError,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: async_openai::error::OpenAIError,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
