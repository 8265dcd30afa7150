use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{CardPostError, CardPostResult};

/// Platform cap on images attached to a single post.
pub const MAX_MEDIA_PER_POST: usize = 4;

static IMAGE_MARKER_RE: OnceLock<Regex> = OnceLock::new();

fn image_marker_re() -> &'static Regex {
    IMAGE_MARKER_RE
        .get_or_init(|| Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").expect("image marker regex"))
}

/// Strip Markdown image markers from `text`, returning the trimmed text and
/// the image URLs in order of appearance.
pub fn extract_media(text: &str) -> CardPostResult<(String, Vec<String>)> {
    let mut media = Vec::new();
    let stripped = image_marker_re().replace_all(text, |captures: &Captures<'_>| {
        if let Some(url) = captures.get(1) {
            media.push(url.as_str().to_string());
        }
        ""
    });
    if media.len() > MAX_MEDIA_PER_POST {
        return Err(CardPostError::validation(format!(
            "Can not upload more than {MAX_MEDIA_PER_POST} images per tweet"
        )));
    }
    Ok((stripped.trim().to_string(), media))
}
