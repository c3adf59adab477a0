pub mod media;
pub mod processing;
pub mod publishing;
pub mod scraping;
