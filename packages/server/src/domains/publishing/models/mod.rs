pub mod publish_log;

pub use publish_log::{Platform, PublishLog};
