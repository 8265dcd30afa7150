use cardpost_core::{CardPostResult, ItemState, ProjectColumn, TrackedItem, TrackingApi};
use tracing::info;

use crate::run_config::RunConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Item is open and the card sits in the configured column.
    Proceed {
        item: TrackedItem,
        column: ProjectColumn,
    },
    ItemNotOpen(ItemState),
    ColumnMismatch(String),
}

/// Fetch the tracked item and the card's column and decide whether it is this
/// run's turn to publish.
pub async fn resolve_content(
    tracking: &dyn TrackingApi,
    config: &RunConfig,
    item_number: u64,
    column_id: u64,
) -> CardPostResult<Resolution> {
    let item = tracking.get_item(item_number).await?;
    let column = tracking.get_column(column_id).await?;

    if item.state != ItemState::Open {
        info!(
            item = item.number,
            state = item.state.as_str(),
            "tracked item is not open"
        );
        return Ok(Resolution::ItemNotOpen(item.state));
    }
    if column.name != config.column {
        info!(
            item = item.number,
            column = %column.name,
            expected = %config.column,
            "card is not in the publishing column"
        );
        return Ok(Resolution::ColumnMismatch(column.name));
    }
    Ok(Resolution::Proceed { item, column })
}
