pub mod tex_loader;

pub use tex_loader::{list_exam_years, load_exam_sources, ExamSources};
