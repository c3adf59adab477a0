pub mod activities;
pub mod image_ops;
pub mod models;
