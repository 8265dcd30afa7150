//! Turns a parsed post intent into a platform-ready publish request.

use tracing::debug;

use crate::error::{CardPostError, CardPostResult};
use crate::mentions::leading_mentions;
use crate::status_url::StatusUrl;
use crate::types::{IntentKind, ParsedIntent, PublishRequest};
use crate::weighted_length::weighted_overage;

pub const MEDIA_UNSUPPORTED_MESSAGE: &str =
    "Media is not supported yet. Please remove the image from the tweet content.";

/// Validate a post intent and build its publish request.
///
/// `media_ids` is left empty; callers attach uploaded media ids afterwards so
/// nothing is uploaded for a post that fails validation.
pub fn compose_publish_request(
    intent: &ParsedIntent,
    media_supported: bool,
) -> CardPostResult<PublishRequest> {
    if intent.kind != IntentKind::Post {
        return Err(CardPostError::validation(
            "only post intents can be composed into a status update",
        ));
    }
    if !intent.media_urls.is_empty() && !media_supported {
        return Err(CardPostError::validation(MEDIA_UNSUPPORTED_MESSAGE));
    }
    if intent.text.is_empty() && intent.media_urls.is_empty() {
        return Err(CardPostError::validation("Tweet content is empty."));
    }
    if let Some(overage) = weighted_overage(&intent.text) {
        return Err(CardPostError::validation(format!(
            "Tweet content too long by {overage} weighted characters."
        )));
    }

    let mut request = PublishRequest {
        text: intent.text.clone(),
        attachment_url: intent.repost_url.clone(),
        ..PublishRequest::default()
    };

    if let Some(reply_to_url) = intent.reply_to_url.as_deref() {
        let target = StatusUrl::parse(reply_to_url).ok_or_else(|| {
            CardPostError::lookup(format!("Invalid reply URL: {reply_to_url}"))
        })?;
        let mentions = leading_mentions(&intent.text);
        let author = target.author.to_ascii_lowercase();
        request.auto_populate_reply_metadata = !mentions.contains(&author);
        debug!(
            reply_target_id = %target.id,
            author = %target.author,
            leading_mentions = mentions.len(),
            auto_populate = request.auto_populate_reply_metadata,
            "resolved reply target"
        );
        request.reply_target_id = Some(target.id);
    }

    Ok(request)
}
