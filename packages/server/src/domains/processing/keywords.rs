//! Keyword extraction from post text.

use std::collections::HashMap;

use super::constants::STOPWORDS;

const MAX_KEYWORDS: usize = 10;

/// Strip URLs, mentions and special characters, collapsing whitespace.
/// Basic punctuation survives so captions stay readable.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut words = Vec::new();

    for word in text.split_whitespace() {
        if word.starts_with("http") || word.starts_with('@') {
            continue;
        }
        words.push(word);
    }

    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        for ch in word.chars() {
            if ch.is_alphanumeric() || ch.is_whitespace() || matches!(ch, '.' | ',' | '!' | '?' | '\'') {
                out.push(ch);
            }
        }
    }

    out.trim().to_string()
}

/// Extract the most frequent meaningful words from the text.
///
/// Words are lowercased, stripped of punctuation, filtered against the
/// stopword list and a minimum length of 4 characters, then ranked by
/// frequency. Ties keep first-seen order so extraction is deterministic.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut freq: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for raw in text.to_lowercase().split_whitespace() {
        let token: String = raw.chars().filter(|c| c.is_alphanumeric()).collect();
        if token.len() <= 3 || STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        match freq.get_mut(&token) {
            Some(count) => *count += 1,
            None => {
                freq.insert(token.clone(), 1);
                order.push(token);
            }
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = order
        .into_iter()
        .enumerate()
        .map(|(seen, word)| {
            let count = freq[&word];
            (word, count, seen)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _, _)| word)
        .collect()
}

/// Find keyword pairs that appear adjacent in the text, in either order.
/// Useful as compound hashtags ("machine learning" -> #machineLearning).
pub fn find_compound_keywords(keywords: &[String], text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut compounds = Vec::new();

    for (i, kw1) in keywords.iter().enumerate() {
        for kw2 in &keywords[i + 1..] {
            let forward = format!("{} {}", kw1, kw2);
            let reverse = format!("{} {}", kw2, kw1);
            if lowered.contains(&forward) && !compounds.contains(&forward) {
                compounds.push(forward);
            }
            if lowered.contains(&reverse) && !compounds.contains(&reverse) {
                compounds.push(reverse);
            }
        }
    }

    compounds.truncate(5);
    compounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_links_and_mentions() {
        assert_eq!(
            clean_text("check https://example.com this @user out!"),
            "check this out!"
        );
        assert_eq!(clean_text("a  b\t c"), "a b c");
    }

    #[test]
    fn extracts_frequent_long_words() {
        let text = "octopus octopus brains brains brains the an it";
        let keywords = extract_keywords(text);
        assert_eq!(keywords[0], "brains");
        assert_eq!(keywords[1], "octopus");
    }

    #[test]
    fn skips_stopwords_and_short_tokens() {
        let keywords = extract_keywords("about being would cat dog x");
        assert!(keywords.is_empty());
    }

    #[test]
    fn caps_at_ten_keywords() {
        let text = "alpha bravo charlie delta echoes foxtrot golfer hotels indias juliet kilos limas";
        assert_eq!(extract_keywords(text).len(), 10);
    }

    #[test]
    fn finds_adjacent_compounds() {
        let keywords = vec!["machine".to_string(), "learning".to_string()];
        let compounds = find_compound_keywords(&keywords, "Machine learning is everywhere");
        assert_eq!(compounds, vec!["machine learning"]);
    }
}
