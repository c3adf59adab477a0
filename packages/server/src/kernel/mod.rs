pub mod ai;
pub mod deps;
pub mod traits;

#[cfg(test)]
pub mod test_dependencies;

pub use ai::AnthropicAI;
pub use deps::PipelineDeps;
pub use traits::BaseAI;
