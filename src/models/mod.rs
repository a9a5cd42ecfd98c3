pub mod loaders;
pub mod question;
pub mod subject;

pub use loaders::{list_exam_years, load_exam_sources, ExamSources};
pub use question::{AnswerKey, AnswerLetter, ExamYear, ImageImportance, ImageType, QuestionRecord};
pub use subject::{FixedSection, Subject};
