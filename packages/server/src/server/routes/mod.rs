pub mod contents;
pub mod health;

pub use contents::{
    approve_handler, get_content_handler, list_contents_handler, publish_handler, reject_handler,
    reprocess_handler, update_content_handler,
};
pub use health::health_handler;
