#![no_main]

use cardpost_core::match_tracked_item_number;
use cardpost_github::parse_card_event;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    if let Ok(Some(card)) = parse_card_event(&raw) {
        let _ = match_tracked_item_number(card.content_url.as_deref());
    }
});
