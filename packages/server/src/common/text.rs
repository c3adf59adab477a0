//! Small text utilities shared by the pipeline stages.

/// Truncate to at most `max_len` characters, appending "..." when cut.
///
/// The suffix counts against the limit, so output never exceeds `max_len`.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let truncated: String = text.chars().take(keep).collect();
    format!("{}...", truncated)
}

/// Strip HTML tags and decode the handful of entities Reddit bodies use.
pub fn clean_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

/// Lowercase alphanumeric slug with `-` separators, for media filenames.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = true;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_text("hello world", 8), "hello...");
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn cleans_html_tags_and_entities() {
        assert_eq!(
            clean_html("<p>Tom &amp; Jerry</p>"),
            "Tom & Jerry"
        );
        assert_eq!(clean_html("no markup"), "no markup");
        assert_eq!(clean_html("a &lt;b&gt; c"), "a <b> c");
    }

    #[test]
    fn slugifies_titles() {
        assert_eq!(slugify("TIL: the Moon has moonquakes!"), "til-the-moon-has-moonquakes");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
        assert_eq!(slugify(""), "");
    }
}
