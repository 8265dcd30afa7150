use std::sync::OnceLock;

use regex::Regex;

static STATUS_URL_RE: OnceLock<Regex> = OnceLock::new();

fn status_url_re() -> &'static Regex {
    STATUS_URL_RE.get_or_init(|| {
        Regex::new(r"^https?://(?:www\.)?(?:twitter|x)\.com/([^/]+)/status/([0-9]+)/?$")
            .expect("status url regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Author handle and numeric id captured from a status permalink.
pub struct StatusUrl {
    pub author: String,
    pub id: String,
}

impl StatusUrl {
    /// Accepts permalinks on both `twitter.com` and `x.com`.
    pub fn parse(url: &str) -> Option<Self> {
        let captures = status_url_re().captures(url.trim())?;
        Some(Self {
            author: captures.get(1)?.as_str().to_string(),
            id: captures.get(2)?.as_str().to_string(),
        })
    }
}

/// Numeric status id of a permalink such as `https://twitter.com/alice/status/12345`.
pub fn parse_status_id(url: &str) -> Option<String> {
    StatusUrl::parse(url).map(|status| status.id)
}

/// Permalink for a status posted by `handle`.
pub fn status_permalink(handle: &str, id: &str) -> String {
    format!("https://twitter.com/{handle}/status/{id}")
}
