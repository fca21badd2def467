pub mod export_service;
pub mod llm_service;
pub mod outline_service;

pub use export_service::ExportService;
pub use llm_service::{build_analysis_prompt, LlmService, TextGenerator};
