pub(crate) const ERROR_BODY_MAX_CHARS: usize = 800;

pub(crate) fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Rate-limit reset epoch when the response reports an exhausted quota.
pub(crate) fn exhausted_rate_limit_reset(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?;
    if remaining.trim() != "0" {
        return None;
    }
    headers
        .get("x-ratelimit-reset")?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}

pub(crate) fn describe_github_failure(
    status: u16,
    rate_limit_reset: Option<u64>,
    body: &str,
) -> String {
    let mut message = format!(
        "status {status}: {}",
        truncate_for_error(body.trim(), ERROR_BODY_MAX_CHARS)
    );
    if let Some(reset) = rate_limit_reset {
        message.push_str(&format!(" (rate limit exhausted, resets at {reset})"));
    }
    message
}
