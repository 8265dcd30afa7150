//! Content-transformation and dispatch policy for publishing posts from
//! project cards. This crate owns payload parsing, media marker extraction,
//! weighted-length validation and publish-request composition; the HTTP
//! collaborators live in sibling crates and plug in through
//! [`collaborators`].

pub mod card_payload;
pub mod collaborators;
pub mod error;
pub mod media_markers;
pub mod mentions;
pub mod post_composer;
pub mod status_url;
pub mod trigger_filter;
pub mod types;
pub mod weighted_length;

pub use card_payload::{parse_card_payload, PayloadFieldMap, PayloadParseOutcome};
pub use collaborators::{MediaUploader, SocialApi, TrackingApi};
pub use error::{CardPostError, CardPostResult};
pub use media_markers::{extract_media, MAX_MEDIA_PER_POST};
pub use mentions::leading_mentions;
pub use post_composer::{compose_publish_request, MEDIA_UNSUPPORTED_MESSAGE};
pub use status_url::{parse_status_id, status_permalink, StatusUrl};
pub use trigger_filter::match_tracked_item_number;
pub use types::{
    AccountIdentity, CardEvent, IntentKind, ItemState, ParsedIntent, ProjectColumn,
    PublishRequest, PublishResult, TrackedItem,
};
pub use weighted_length::{weighted_length, weighted_overage, MAX_WEIGHTED_LENGTH};
