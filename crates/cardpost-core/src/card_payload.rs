//! Parsing of the JSON content payload attached to a project card.

use serde_json::{Map, Value};

use crate::error::{CardPostError, CardPostResult};
use crate::media_markers::extract_media;
use crate::status_url::parse_status_id;
use crate::types::{IntentKind, ParsedIntent};

const SCHEDULE_FIELD: &str = "date";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Payload field names holding the post body, repost target and reply target.
pub struct PayloadFieldMap {
    pub content: String,
    pub repost: String,
    pub reply_to: String,
}

impl Default for PayloadFieldMap {
    fn default() -> Self {
        Self {
            content: "content".to_string(),
            repost: "repost".to_string(),
            reply_to: "replyTo".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadParseOutcome {
    /// The card carries a scheduling marker; publishing is left for later.
    Scheduled,
    Intent(ParsedIntent),
}

/// Classify a raw card payload into a post or repost intent.
pub fn parse_card_payload(
    raw: &str,
    fields: &PayloadFieldMap,
) -> CardPostResult<PayloadParseOutcome> {
    let value: Value = serde_json::from_str(raw).map_err(|error| {
        CardPostError::validation(format!("card content is not valid JSON: {error}"))
    })?;
    let Value::Object(payload) = value else {
        return Err(CardPostError::validation(
            "card content must be a JSON object",
        ));
    };

    if is_scheduled(payload.get(SCHEDULE_FIELD)) {
        return Ok(PayloadParseOutcome::Scheduled);
    }

    let content = string_field(&payload, &fields.content)?;
    let repost_url = string_field(&payload, &fields.repost)?.map(|url| url.trim().to_string());
    let reply_to_url =
        string_field(&payload, &fields.reply_to)?.map(|url| url.trim().to_string());

    if let (Some(repost_url), None) = (repost_url.as_deref(), content.as_deref()) {
        let target_id = parse_status_id(repost_url).ok_or_else(|| {
            CardPostError::lookup(format!("Invalid retweet URL: {repost_url}"))
        })?;
        return Ok(PayloadParseOutcome::Intent(ParsedIntent {
            kind: IntentKind::Repost,
            text: String::new(),
            media_urls: Vec::new(),
            repost_url: Some(repost_url.to_string()),
            reply_to_url,
            repost_target_id: Some(target_id),
        }));
    }

    let (text, media_urls) = extract_media(content.as_deref().unwrap_or_default())?;
    Ok(PayloadParseOutcome::Intent(ParsedIntent {
        kind: IntentKind::Post,
        text,
        media_urls,
        repost_url,
        reply_to_url,
        repost_target_id: None,
    }))
}

fn is_scheduled(marker: Option<&Value>) -> bool {
    match marker {
        Some(Value::Object(date)) => {
            date.get("valid").is_some_and(is_truthy)
                || ["timestamp", "value"]
                    .iter()
                    .any(|key| date.get(*key).is_some_and(|value| !value.is_null()))
        }
        Some(Value::String(date)) => !date.trim().is_empty(),
        _ => false,
    }
}

/// Truthiness of a loosely typed flag: `false`, `0`, `""` and `null` are off.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn string_field(payload: &Map<String, Value>, name: &str) -> CardPostResult<Option<String>> {
    match payload.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) if value.trim().is_empty() => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(CardPostError::validation(format!(
            "card content field `{name}` must be a string"
        ))),
    }
}
