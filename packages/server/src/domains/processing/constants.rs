//! Fixed vocabulary for deterministic caption and hashtag generation.

/// Platform character and hashtag limits
pub const INSTAGRAM_MAX_CAPTION: usize = 2200;
pub const TIKTOK_MAX_CAPTION: usize = 150;
pub const INSTAGRAM_MAX_HASHTAGS: usize = 30;
pub const TIKTOK_MAX_HASHTAGS: usize = 10;

/// Common English stopwords filtered out during keyword extraction
pub const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "also", "because", "been",
    "before", "being", "below", "between", "both", "cannot", "could", "does",
    "doing", "down", "during", "each", "even", "every", "from", "further",
    "have", "having", "here", "into", "itself", "just", "like", "made",
    "many", "more", "most", "much", "myself", "once", "only", "other",
    "over", "same", "should", "some", "such", "than", "that", "their",
    "them", "then", "there", "these", "they", "this", "those", "through",
    "under", "until", "very", "were", "what", "when", "where", "which",
    "while", "will", "with", "would", "your", "yours", "really", "still",
    "thing", "things", "today", "learned", "people", "years", "year",
];

/// Generic hashtags by category, used to pad keyword hashtags
pub const GENERIC_HASHTAGS: &[(&str, &[&str])] = &[
    (
        "learning",
        &["#DidYouKnow", "#TodayILearned", "#InterestingFacts", "#Knowledge", "#Learning"],
    ),
    (
        "science",
        &["#Science", "#ScienceFacts", "#STEM", "#Research", "#Discovery"],
    ),
    (
        "history",
        &["#History", "#HistoricalFacts", "#OTD", "#OnThisDay", "#Heritage"],
    ),
    (
        "tech",
        &["#Technology", "#Tech", "#Innovation", "#Digital", "#Future"],
    ),
    (
        "nature",
        &["#Nature", "#Wildlife", "#Environment", "#Planet", "#Earth"],
    ),
    (
        "art",
        &["#Art", "#Creativity", "#Design", "#Inspiration", "#Creative"],
    ),
    (
        "motivation",
        &["#Motivation", "#Inspiration", "#Goals", "#Success", "#Mindset"],
    ),
];

/// Emojis prepended to Instagram captions
pub const CAPTION_EMOJIS: &[&str] = &["✨", "🧠", "💡", "🤓"];
