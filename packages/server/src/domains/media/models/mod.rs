pub mod media_content;

pub use media_content::{MediaContent, MediaKind, MediaSource};
