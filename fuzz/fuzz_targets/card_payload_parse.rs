#![no_main]

use cardpost_core::{
    compose_publish_request, parse_card_payload, weighted_length, IntentKind,
    PayloadFieldMap, PayloadParseOutcome, MAX_MEDIA_PER_POST,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let _ = weighted_length(&raw);
    let Ok(PayloadParseOutcome::Intent(intent)) =
        parse_card_payload(&raw, &PayloadFieldMap::default())
    else {
        return;
    };
    assert!(intent.media_urls.len() <= MAX_MEDIA_PER_POST);
    if intent.kind == IntentKind::Post {
        if let Ok(request) = compose_publish_request(&intent, true) {
            assert!(!request.text.trim().is_empty() || !intent.media_urls.is_empty());
            assert!(request.media_ids.is_empty());
        }
    }
});
