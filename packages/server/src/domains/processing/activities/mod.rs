//! Processing domain actions - business logic functions

mod process;

pub use process::{generate_content, process_pending_posts, GeneratedContent, ProcessSummary};
