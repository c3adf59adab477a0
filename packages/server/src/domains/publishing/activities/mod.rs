//! Publishing domain actions - business logic functions

mod publish;

pub use publish::{
    publish_content, publish_validated_contents, publish_with_retry, Publisher, PublishSummary,
};
