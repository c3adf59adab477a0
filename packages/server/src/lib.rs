// Reddit Content Pipeline - Core
//
// This crate provides the content pipeline: scrape trending Reddit posts,
// rewrite them into platform captions, attach stock media, and publish to
// Instagram and TikTok after review.
//
// Pipeline stages are organized per-domain in domains/*/activities/

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
