pub mod generation_log;
pub mod processed_content;

pub use generation_log::AiGenerationLog;
pub use processed_content::{ContentStatus, ProcessedContent};
