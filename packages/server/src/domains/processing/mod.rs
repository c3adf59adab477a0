pub mod activities;
pub mod captions;
pub mod constants;
pub mod hashtags;
pub mod keywords;
pub mod models;
pub mod prompts;
