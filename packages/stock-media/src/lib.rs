//! Clients for the stock media providers used to pair posts with visuals.
//!
//! Each provider client wraps its REST search API behind a small typed
//! surface and shares a per-provider rate limiter so bursts of pipeline
//! runs stay inside free-tier quotas.
//!
//! # Example
//!
//! ```no_run
//! use stock_media::PexelsClient;
//!
//! # async fn run() -> Result<(), stock_media::MediaSearchError> {
//! let client = PexelsClient::new("api-key".to_string());
//! let photos = client.search_photos("sunset", 10).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod limiter;
pub mod pexels;
pub mod pixabay;
pub mod types;
pub mod unsplash;

pub use error::{MediaSearchError, Result};
pub use pexels::PexelsClient;
pub use pixabay::PixabayClient;
pub use types::{MediaSource, StockPhoto, StockVideo};
pub use unsplash::UnsplashClient;
