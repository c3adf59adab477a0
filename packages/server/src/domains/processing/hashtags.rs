//! Hashtag generation from extracted keywords.

use rand::seq::SliceRandom;

use super::constants::GENERIC_HASHTAGS;
use super::keywords::find_compound_keywords;

/// Format a keyword or phrase as a camelCase hashtag body.
/// Returns None when nothing alphanumeric remains.
pub fn clean_keyword(keyword: &str) -> Option<String> {
    let words: Vec<String> = keyword
        .split_whitespace()
        .map(|w| w.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return None;
    }

    let mut out = words[0].to_lowercase();
    for word in &words[1..] {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    Some(out)
}

/// Random sample of generic hashtags, learning tags always included.
fn generic_hashtags(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();

    let mut categories: Vec<&(&str, &[&str])> = GENERIC_HASHTAGS.iter().collect();
    categories.shuffle(&mut rng);

    let mut pool: Vec<&str> = Vec::new();
    for (_, tags) in categories.iter().take(3) {
        pool.extend_from_slice(tags);
    }
    // Learning tags are always relevant to TIL-style content
    if let Some((_, learning)) = GENERIC_HASHTAGS.iter().find(|(name, _)| *name == "learning") {
        pool.extend_from_slice(learning);
    }

    pool.shuffle(&mut rng);
    let mut out: Vec<String> = Vec::new();
    for tag in pool {
        if !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
        if out.len() >= count {
            break;
        }
    }
    out
}

/// Build the hashtag list for one platform.
///
/// Keyword hashtags come first, then compound phrases found in the text,
/// then a random handful of generic tags. Duplicates are dropped keeping
/// first occurrence, and the list is capped at `max_hashtags`.
pub fn generate_hashtags(keywords: &[String], text: &str, max_hashtags: usize) -> Vec<String> {
    let mut hashtags: Vec<String> = Vec::new();

    for keyword in keywords {
        if let Some(clean) = clean_keyword(keyword) {
            hashtags.push(format!("#{}", clean));
        }
    }

    for compound in find_compound_keywords(keywords, text) {
        if let Some(clean) = clean_keyword(&compound) {
            hashtags.push(format!("#{}", clean));
        }
    }

    let generic_count = (max_hashtags / 3).min(5).max(1);
    hashtags.extend(generic_hashtags(generic_count));

    let mut unique: Vec<String> = Vec::new();
    for tag in hashtags {
        if !unique.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            unique.push(tag);
        }
    }

    unique.truncate(max_hashtags);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::processing::constants::{INSTAGRAM_MAX_HASHTAGS, TIKTOK_MAX_HASHTAGS};

    #[test]
    fn camel_cases_phrases() {
        assert_eq!(clean_keyword("machine learning"), Some("machineLearning".to_string()));
        assert_eq!(clean_keyword("Octopus"), Some("octopus".to_string()));
        assert_eq!(clean_keyword("!!!"), None);
    }

    #[test]
    fn keyword_tags_come_first() {
        let keywords = vec!["octopus".to_string(), "brains".to_string()];
        let tags = generate_hashtags(&keywords, "octopus brains", INSTAGRAM_MAX_HASHTAGS);
        assert_eq!(tags[0], "#octopus");
        assert_eq!(tags[1], "#brains");
    }

    #[test]
    fn respects_platform_caps() {
        let keywords: Vec<String> = (0..40).map(|i| format!("keyword{}", i)).collect();
        assert!(generate_hashtags(&keywords, "", INSTAGRAM_MAX_HASHTAGS).len() <= 30);
        assert!(generate_hashtags(&keywords, "", TIKTOK_MAX_HASHTAGS).len() <= 10);
    }

    #[test]
    fn deduplicates_case_insensitively() {
        let keywords = vec!["knowledge".to_string()];
        let tags = generate_hashtags(&keywords, "", INSTAGRAM_MAX_HASHTAGS);
        let knowledge_count = tags
            .iter()
            .filter(|t| t.eq_ignore_ascii_case("#knowledge"))
            .count();
        assert_eq!(knowledge_count, 1);
    }
}
