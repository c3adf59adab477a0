pub mod activities;
pub mod instagram;
pub mod models;
pub mod tiktok;
