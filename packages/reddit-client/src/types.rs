use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Time window for `top` listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::Hour => "hour",
            TimeFilter::Day => "day",
            TimeFilter::Week => "week",
            TimeFilter::Month => "month",
            TimeFilter::Year => "year",
            TimeFilter::All => "all",
        }
    }

    /// Parse from config strings; unknown values fall back to `day`.
    pub fn parse(s: &str) -> Self {
        match s {
            "hour" => TimeFilter::Hour,
            "week" => TimeFilter::Week,
            "month" => TimeFilter::Month,
            "year" => TimeFilter::Year,
            "all" => TimeFilter::All,
            _ => TimeFilter::Day,
        }
    }
}

/// OAuth token response from `/api/v1/access_token`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Listing envelope: `{"kind": "Listing", "data": {"children": [...]}}`.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    pub children: Vec<Thing>,
    pub after: Option<String>,
}

/// A `t3` wrapper around a link/post.
#[derive(Debug, Deserialize)]
pub struct Thing {
    pub data: Post,
}

/// A single Reddit link post.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub url: Option<String>,
    pub subreddit: String,
    pub score: i64,
    pub num_comments: i64,
    pub created_utc: f64,
    pub author: Option<String>,
    pub permalink: String,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub stickied: bool,
}

impl Post {
    /// Creation time as a UTC timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.created_utc as i64, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Author name, `[deleted]` when absent.
    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or("[deleted]")
    }

    /// Full URL of the post on reddit.com.
    pub fn full_permalink(&self) -> String {
        format!("https://reddit.com{}", self.permalink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_JSON: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": "t3_abc",
            "children": [
                {
                    "kind": "t3",
                    "data": {
                        "id": "1abc2d",
                        "title": "TIL something surprising",
                        "selftext": "",
                        "url": "https://example.com/article",
                        "subreddit": "todayilearned",
                        "score": 4521,
                        "num_comments": 312,
                        "created_utc": 1735689600.0,
                        "author": "some_user",
                        "permalink": "/r/todayilearned/comments/1abc2d/til/",
                        "over_18": false,
                        "stickied": false
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn deserializes_listing() {
        let listing: Listing = serde_json::from_str(LISTING_JSON).unwrap();
        assert_eq!(listing.data.children.len(), 1);

        let post = &listing.data.children[0].data;
        assert_eq!(post.id, "1abc2d");
        assert_eq!(post.score, 4521);
        assert_eq!(post.author_name(), "some_user");
        assert!(!post.over_18);
        assert_eq!(
            post.full_permalink(),
            "https://reddit.com/r/todayilearned/comments/1abc2d/til/"
        );
    }

    #[test]
    fn deleted_author_renders_placeholder() {
        let post = Post {
            id: "x".into(),
            title: "t".into(),
            selftext: String::new(),
            url: None,
            subreddit: "test".into(),
            score: 1,
            num_comments: 0,
            created_utc: 0.0,
            author: None,
            permalink: "/r/test/x".into(),
            over_18: false,
            stickied: false,
        };
        assert_eq!(post.author_name(), "[deleted]");
    }

    #[test]
    fn time_filter_parses_with_day_fallback() {
        assert_eq!(TimeFilter::parse("week"), TimeFilter::Week);
        assert_eq!(TimeFilter::parse("bogus"), TimeFilter::Day);
        assert_eq!(TimeFilter::Day.as_str(), "day");
    }
}
