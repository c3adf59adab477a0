use serde::{Deserialize, Serialize};

/// Which provider a media result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSource {
    Unsplash,
    Pexels,
    Pixabay,
    Fallback,
}

impl MediaSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaSource::Unsplash => "unsplash",
            MediaSource::Pexels => "pexels",
            MediaSource::Pixabay => "pixabay",
            MediaSource::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized stock photo search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPhoto {
    pub source: MediaSource,
    pub source_id: String,
    /// Direct URL of the downloadable image file.
    pub download_url: String,
    /// URL of the photo's page on the provider site.
    pub page_url: String,
    pub width: u32,
    pub height: u32,
}

/// A normalized stock video search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockVideo {
    pub source: MediaSource,
    pub source_id: String,
    /// Direct URL of the downloadable video file.
    pub download_url: String,
    /// URL of the video's page on the provider site.
    pub page_url: String,
    pub width: u32,
    pub height: u32,
    pub duration_secs: Option<f64>,
}
