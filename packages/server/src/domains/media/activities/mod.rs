//! Media domain actions - business logic functions

mod find_media;

pub use find_media::{attach_media, resolve_query, MediaSummary};
