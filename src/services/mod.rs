pub mod dataset_writer;
pub mod image_store;
pub mod llm_service;

pub use dataset_writer::DatasetWriter;
pub use image_store::ImageStore;
pub use llm_service::{Classifier, LlmService};
