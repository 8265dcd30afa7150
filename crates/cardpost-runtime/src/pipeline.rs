use cardpost_core::{
    match_tracked_item_number, parse_card_payload, CardEvent, CardPostResult, ItemState,
    MediaUploader, PayloadParseOutcome, SocialApi, TrackingApi,
};
use tracing::{info, warn};

use crate::completion_reporter::report_completion;
use crate::content_resolver::{resolve_content, Resolution};
use crate::publisher::{publish_intent, Publication};
use crate::run_config::RunConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates reasons a run ends successfully without publishing.
pub enum SkipReason {
    NoTrackedItem,
    ItemNotOpen { state: ItemState },
    ColumnMismatch { column: String },
    ScheduledContent,
}

impl SkipReason {
    pub fn describe(&self) -> String {
        match self {
            Self::NoTrackedItem => "Not running on an event with an associated card.".to_string(),
            Self::ItemNotOpen { state } => {
                format!("Tracked item is {}; nothing to publish.", state.as_str())
            }
            Self::ColumnMismatch { column } => {
                format!("Card is in column '{column}'; nothing to publish.")
            }
            Self::ScheduledContent => "Ignoring scheduled tweets for now.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Skipped(SkipReason),
    Published(Publication),
}

#[derive(Clone, Copy)]
/// External systems a run talks to.
pub struct Collaborators<'a> {
    pub tracking: &'a dyn TrackingApi,
    pub social: &'a dyn SocialApi,
    /// Present only when media upload is enabled.
    pub uploader: Option<&'a dyn MediaUploader>,
}

/// The card and its tracked item number, when the event concerns an issue or
/// pull request card.
pub fn triggering_item(card: Option<&CardEvent>) -> Option<(&CardEvent, u64)> {
    let card = card?;
    match_tracked_item_number(card.content_url.as_deref()).map(|number| (card, number))
}

/// Run the card publishing pipeline once for the triggering card event.
pub async fn run_card_pipeline(
    config: &RunConfig,
    card: Option<&CardEvent>,
    collaborators: Collaborators<'_>,
) -> CardPostResult<RunOutcome> {
    let Some((card, item_number)) = triggering_item(card) else {
        let reason = SkipReason::NoTrackedItem;
        info!("{}", reason.describe());
        return Ok(RunOutcome::Skipped(reason));
    };

    let column = match resolve_content(
        collaborators.tracking,
        config,
        item_number,
        card.column_id,
    )
    .await?
    {
        Resolution::Proceed { column, .. } => column,
        Resolution::ItemNotOpen(state) => {
            return Ok(RunOutcome::Skipped(SkipReason::ItemNotOpen { state }))
        }
        Resolution::ColumnMismatch(column) => {
            return Ok(RunOutcome::Skipped(SkipReason::ColumnMismatch { column }))
        }
    };

    let intent = match parse_card_payload(&config.card_content, &config.field_map)? {
        PayloadParseOutcome::Intent(intent) => intent,
        PayloadParseOutcome::Scheduled => {
            let reason = SkipReason::ScheduledContent;
            info!(item = item_number, "{}", reason.describe());
            return Ok(RunOutcome::Skipped(reason));
        }
    };

    let publication =
        publish_intent(collaborators.social, collaborators.uploader, &intent).await?;

    if let Err(error) = report_completion(
        collaborators.tracking,
        config,
        item_number,
        card.card_id,
        &column,
        &publication.message,
    )
    .await
    {
        warn!(
            item = item_number,
            post_id = %publication.result.post_id,
            error_kind = error.kind(),
            "post was published but reporting back failed"
        );
        return Err(error);
    }
    Ok(RunOutcome::Published(publication))
}
