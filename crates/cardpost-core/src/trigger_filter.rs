use std::sync::OnceLock;

use regex::Regex;

static TRACKED_ITEM_URL_RE: OnceLock<Regex> = OnceLock::new();

fn tracked_item_url_re() -> &'static Regex {
    TRACKED_ITEM_URL_RE.get_or_init(|| {
        Regex::new(r"/(?:issues|pull-requests|pulls)/(\d+)$").expect("tracked item url regex")
    })
}

/// Return the issue or pull request number referenced by a card content URL.
///
/// Cards without linked content (plain notes) carry no URL and yield `None`.
pub fn match_tracked_item_number(content_url: Option<&str>) -> Option<u64> {
    let captures = tracked_item_url_re().captures(content_url?.trim())?;
    captures.get(1)?.as_str().parse::<u64>().ok()
}
