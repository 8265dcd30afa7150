use cardpost_core::{CardPostError, CardPostResult, ProjectColumn, TrackingApi};
use tracing::info;

use crate::run_config::RunConfig;

/// Comment the result on the tracked item, close it, and move the card to the
/// done column when one is configured.
///
/// Runs after a successful publish, so a failure here leaves the post live
/// with the item only partially updated.
pub async fn report_completion(
    tracking: &dyn TrackingApi,
    config: &RunConfig,
    item_number: u64,
    card_id: u64,
    card_column: &ProjectColumn,
    message: &str,
) -> CardPostResult<()> {
    tracking.create_comment(item_number, message).await?;
    tracking.close_item(item_number).await?;
    info!(item = item_number, "commented and closed tracked item");

    let Some(done_column) = config.done_column.as_deref() else {
        return Ok(());
    };
    let project_id = card_column.project_id().ok_or_else(|| {
        CardPostError::lookup(format!(
            "Could not determine the project of column {}",
            card_column.name
        ))
    })?;
    let columns = tracking.list_project_columns(project_id).await?;
    let target = columns
        .iter()
        .find(|column| column.name == done_column)
        .ok_or_else(|| CardPostError::lookup(format!("Column {done_column} not found")))?;
    tracking.move_card(card_id, target.id).await?;
    info!(card = card_id, column = %target.name, "moved card to done column");
    Ok(())
}
