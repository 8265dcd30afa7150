//! Weighted character counting following the platform's v3 text rules.
//!
//! Text is NFC-normalized first. Code points in the ranges below weigh 100
//! units, everything else weighs 200, and the budget is expressed in units of
//! 100. Every URL, with or without a scheme, counts as a fixed 23 characters
//! regardless of its real length, and an emoji grapheme cluster (modifiers,
//! variation selectors, keycaps, ZWJ joins, flag pairs) counts once.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Maximum weighted length of a single post.
pub const MAX_WEIGHTED_LENGTH: usize = 280;

const SCALE: usize = 100;
const DEFAULT_WEIGHT: usize = 200;
const TRANSFORMED_URL_LENGTH: usize = 23;
const LIGHT_RANGES: &[(u32, u32)] = &[
    (0x0000, 0x10FF),
    (0x2000, 0x200D),
    (0x2010, 0x201F),
    (0x2032, 0x2037),
];
const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?', '\'', '"', ')'];

/// Generic top-level domains recognised without a scheme.
const GENERIC_TLDS: &[&str] = &[
    "aero", "app", "asia", "biz", "blog", "cat", "cloud", "com", "coop", "dev", "edu", "gov",
    "info", "int", "jobs", "live", "mil", "mobi", "museum", "name", "net", "news", "online",
    "org", "page", "pro", "shop", "site", "store", "tech", "tel", "travel", "xxx", "xyz",
];
/// Country-code domains that count as URLs even without a path.
const BARE_CCTLDS: &[&str] = &["co", "tv"];

const VARIATION_SELECTOR_16: char = '\u{FE0F}';
const COMBINING_KEYCAP: char = '\u{20E3}';

static URL_RE: OnceLock<Regex> = OnceLock::new();

fn url_re() -> &'static Regex {
    URL_RE.get_or_init(|| {
        Regex::new(
            r"(?i)https?://[^\s]+|(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,24}(?:/[^\s]*)?",
        )
        .expect("url regex")
    })
}

/// Weighted display length of `text`.
pub fn weighted_length(text: &str) -> usize {
    let normalized = text.nfc().collect::<String>();
    let mut units = 0usize;
    let mut cursor = 0usize;
    for found in url_re().find_iter(&normalized) {
        let url = found.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION);
        if !counts_as_url(url, normalized[..found.start()].chars().next_back()) {
            continue;
        }
        let start = found.start();
        units = units.saturating_add(segment_units(&normalized[cursor..start]));
        units = units.saturating_add(TRANSFORMED_URL_LENGTH * SCALE);
        cursor = start + url.len();
    }
    units = units.saturating_add(segment_units(&normalized[cursor..]));
    units / SCALE
}

/// Weighted characters over [`MAX_WEIGHTED_LENGTH`], if any.
pub fn weighted_overage(text: &str) -> Option<usize> {
    let length = weighted_length(text);
    (length > MAX_WEIGHTED_LENGTH).then(|| length - MAX_WEIGHTED_LENGTH)
}

fn counts_as_url(candidate: &str, preceding: Option<char>) -> bool {
    let lowered = candidate.to_ascii_lowercase();
    if let Some(rest) = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
    {
        return !rest.is_empty();
    }

    // Bare domains glued to a word, an address or a path are not links.
    if preceding.is_some_and(|ch| {
        ch.is_alphanumeric() || matches!(ch, '@' | '.' | '-' | '_' | '/' | '#' | '$')
    }) {
        return false;
    }
    let (domain, has_path) = match lowered.split_once('/') {
        Some((domain, _)) => (domain, true),
        None => (lowered.as_str(), false),
    };
    let Some((_, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    GENERIC_TLDS.contains(&tld)
        || BARE_CCTLDS.contains(&tld)
        || (tld.len() == 2 && has_path)
}

fn segment_units(segment: &str) -> usize {
    segment
        .graphemes(true)
        .map(grapheme_units)
        .fold(0usize, usize::saturating_add)
}

fn grapheme_units(grapheme: &str) -> usize {
    if is_emoji_grapheme(grapheme) {
        return DEFAULT_WEIGHT;
    }
    grapheme
        .chars()
        .map(|ch| code_point_weight(ch as u32))
        .fold(0usize, usize::saturating_add)
}

fn is_emoji_grapheme(grapheme: &str) -> bool {
    let Some(first) = grapheme.chars().next() else {
        return false;
    };
    let code = first as u32;
    is_emoji(code)
        || is_regional_indicator(code)
        || grapheme
            .chars()
            .any(|ch| ch == VARIATION_SELECTOR_16 || ch == COMBINING_KEYCAP)
}

fn code_point_weight(code: u32) -> usize {
    if LIGHT_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&code))
    {
        SCALE
    } else {
        DEFAULT_WEIGHT
    }
}

fn is_emoji(code: u32) -> bool {
    matches!(
        code,
        0x1F000..=0x1FAFF | 0x2300..=0x23FF | 0x2600..=0x27BF | 0x2B00..=0x2BFF
    )
}

fn is_regional_indicator(code: u32) -> bool {
    matches!(code, 0x1F1E6..=0x1F1FF)
}
