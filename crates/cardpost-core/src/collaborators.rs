//! Narrow interfaces to the tracking system and the social platform.

use async_trait::async_trait;

use crate::error::CardPostResult;
use crate::types::{AccountIdentity, ProjectColumn, PublishRequest, TrackedItem};

#[async_trait]
/// Trait contract for the project-tracking system (issues, project boards).
pub trait TrackingApi: Send + Sync {
    async fn get_item(&self, number: u64) -> CardPostResult<TrackedItem>;

    async fn get_column(&self, column_id: u64) -> CardPostResult<ProjectColumn>;

    async fn list_project_columns(&self, project_id: u64) -> CardPostResult<Vec<ProjectColumn>>;

    async fn create_comment(&self, number: u64, body: &str) -> CardPostResult<()>;

    async fn close_item(&self, number: u64) -> CardPostResult<()>;

    /// Move a card to the top of `column_id`.
    async fn move_card(&self, card_id: u64, column_id: u64) -> CardPostResult<()>;
}

#[async_trait]
/// Trait contract for the social platform account used to publish.
pub trait SocialApi: Send + Sync {
    async fn verify_identity(&self) -> CardPostResult<AccountIdentity>;

    /// Publish a post, reply or quote. Returns the new post id.
    async fn post_status(&self, request: &PublishRequest) -> CardPostResult<String>;

    async fn repost(&self, actor_id: &str, target_id: &str) -> CardPostResult<()>;
}

#[async_trait]
/// Optional capability: fetch an image by URL and upload it to the platform.
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, url: &str) -> CardPostResult<String>;
}
