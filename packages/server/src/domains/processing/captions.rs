//! Deterministic caption formatting for each platform.

use rand::seq::SliceRandom;

use super::constants::{CAPTION_EMOJIS, INSTAGRAM_MAX_CAPTION, TIKTOK_MAX_CAPTION};

fn pick_emojis(count: usize) -> String {
    let mut rng = rand::thread_rng();
    CAPTION_EMOJIS
        .choose_multiple(&mut rng, count.min(CAPTION_EMOJIS.len()))
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn take_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn enforce_cap(caption: &mut String, max: usize) {
    if let Some((idx, _)) = caption.char_indices().nth(max) {
        caption.truncate(idx);
    }
}

/// Instagram caption: emojis, title, a body excerpt, source line, hashtags.
/// Shrinks the main text when the assembled caption exceeds the 2200 limit.
pub fn format_for_instagram(title: &str, body: &str, hashtags: &[String]) -> String {
    let emojis = pick_emojis(3);

    let mut main_text = if body.is_empty() {
        format!("{} {}", emojis, title)
    } else {
        format!("{} {}\n\n{}...", emojis, title, take_chars(body, 500))
    };

    let source_text = "\n\nSource: Reddit";
    let tag_block = hashtags.join(" ");

    let mut caption = format!("{}{}\n\n{}", main_text, source_text, tag_block);
    if caption.chars().count() > INSTAGRAM_MAX_CAPTION {
        let excess = caption.chars().count() - INSTAGRAM_MAX_CAPTION;
        let keep = main_text.chars().count().saturating_sub(excess + 3);
        main_text = format!("{}...", take_chars(&main_text, keep));
        caption = format!("{}{}\n\n{}", main_text, source_text, tag_block);
    }

    // Shrinking the main text is not enough when the tag block alone is
    // over the limit.
    enforce_cap(&mut caption, INSTAGRAM_MAX_CAPTION);
    caption
}

/// TikTok caption: title only, plus up to five hashtags, capped at 150 chars.
pub fn format_for_tiktok(title: &str, hashtags: &[String]) -> String {
    let tag_block = hashtags
        .iter()
        .take(5)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    let mut caption = format!("{}\n{}", title, tag_block);
    if caption.chars().count() > TIKTOK_MAX_CAPTION {
        let excess = caption.chars().count() - TIKTOK_MAX_CAPTION;
        let keep = title.chars().count().saturating_sub(excess + 3);
        let short_title = format!("{}...", take_chars(title, keep));
        caption = format!("{}\n{}", short_title, tag_block);
    }

    enforce_cap(&mut caption, TIKTOK_MAX_CAPTION);
    caption
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("#tag{}", i)).collect()
    }

    #[test]
    fn instagram_caption_has_source_and_tags() {
        let caption = format_for_instagram("A title", "Some body text", &tags(3));
        assert!(caption.contains("A title"));
        assert!(caption.contains("Source: Reddit"));
        assert!(caption.ends_with("#tag0 #tag1 #tag2"));
    }

    #[test]
    fn instagram_caption_respects_limit() {
        let long_body = "word ".repeat(600);
        let caption = format_for_instagram("Title", &long_body, &tags(30));
        assert!(caption.chars().count() <= INSTAGRAM_MAX_CAPTION);
    }

    #[test]
    fn tiktok_caption_caps_tags_at_five() {
        let caption = format_for_tiktok("Short title", &tags(10));
        assert!(caption.contains("#tag4"));
        assert!(!caption.contains("#tag5"));
    }

    #[test]
    fn tiktok_caption_capped_even_when_tags_alone_exceed_limit() {
        let long_tags: Vec<String> = (0..5).map(|i| format!("#{}{}", "x".repeat(38), i)).collect();
        let caption = format_for_tiktok("short", &long_tags);
        assert!(caption.chars().count() <= TIKTOK_MAX_CAPTION);
    }

    #[test]
    fn instagram_caption_capped_even_when_tags_alone_exceed_limit() {
        let long_tags: Vec<String> = (0..30).map(|i| format!("#{}{}", "y".repeat(98), i)).collect();
        let caption = format_for_instagram("short", "", &long_tags);
        assert!(caption.chars().count() <= INSTAGRAM_MAX_CAPTION);
    }

    #[test]
    fn tiktok_caption_truncates_long_titles() {
        let title = "t".repeat(300);
        let caption = format_for_tiktok(&title, &tags(2));
        assert!(caption.chars().count() <= TIKTOK_MAX_CAPTION);
        assert!(caption.contains("..."));
    }
}
