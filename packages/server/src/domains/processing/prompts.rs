//! Prompt construction and response parsing for LLM caption generation.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::common::truncate_text;

/// Captions parsed out of an LLM reply
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeneratedCaptions {
    pub instagram_caption: String,
    pub tiktok_caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Build the caption generation prompt for one post.
/// Body text is trimmed to 1000 characters to keep token usage down.
pub fn build_caption_prompt(title: &str, body: &str, subreddit: &str) -> String {
    let body = truncate_text(body, 1000);

    format!(
        r#"You are a social media marketing expert who writes viral content.

REDDIT POST:
Title: {title}
Content: {body}
Subreddit: r/{subreddit}

TASK:
Write two captions for this post:

1. An Instagram caption (2200 characters max):
   - Open with a strong hook
   - Use relevant emojis
   - Rewrite the content in an engaging way
   - End with relevant hashtags (30 max)

2. A TikTok caption (150 characters max):
   - Very short and punchy
   - Include emojis
   - Include a few essential hashtags (5 max)

RESPONSE FORMAT:
Reply with JSON only, structured exactly like this:
{{
  "instagram_caption": "your Instagram caption",
  "tiktok_caption": "your TikTok caption",
  "hashtags": ["relevant", "hashtags"]
}}

Do not reply with anything other than this JSON."#
    )
}

/// Parse the JSON reply into captions. Hashtags are normalized to always
/// start with '#'.
pub fn parse_caption_response(response: &str) -> Result<GeneratedCaptions> {
    let json = anthropic_client::strip_json_fences(response);
    let mut captions: GeneratedCaptions =
        serde_json::from_str(json).context("LLM reply was not the expected JSON shape")?;

    captions.hashtags = captions
        .hashtags
        .into_iter()
        .filter(|t| !t.is_empty())
        .map(|t| {
            if t.starts_with('#') {
                t
            } else {
                format!("#{}", t)
            }
        })
        .collect();

    Ok(captions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_post_fields() {
        let prompt = build_caption_prompt("Moon facts", "The moon shakes", "todayilearned");
        assert!(prompt.contains("Title: Moon facts"));
        assert!(prompt.contains("r/todayilearned"));
    }

    #[test]
    fn prompt_trims_long_bodies() {
        let body = "x".repeat(5000);
        let prompt = build_caption_prompt("t", &body, "s");
        assert!(!prompt.contains(&body));
        assert!(prompt.contains(&format!("{}...", "x".repeat(997))));
    }

    #[test]
    fn parses_fenced_json_reply() {
        let reply = r##"```json
{"instagram_caption": "ig", "tiktok_caption": "tt", "hashtags": ["facts", "#science"]}
```"##;
        let captions = parse_caption_response(reply).unwrap();
        assert_eq!(captions.instagram_caption, "ig");
        assert_eq!(captions.hashtags, vec!["#facts", "#science"]);
    }

    #[test]
    fn rejects_non_json_reply() {
        assert!(parse_caption_response("sorry, I can't do that").is_err());
    }
}
