//! Scraping domain actions - business logic functions

mod scrape;

pub use scrape::{scrape_subreddits, ScrapeSummary};
