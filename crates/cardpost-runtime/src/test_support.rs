use async_trait::async_trait;
use cardpost_core::{
    AccountIdentity, CardPostError, CardPostResult, ItemState, MediaUploader, ProjectColumn,
    PublishRequest, SocialApi, TrackedItem, TrackingApi,
};
use tokio::sync::Mutex as AsyncMutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TrackingCall {
    GetItem(u64),
    GetColumn(u64),
    ListProjectColumns(u64),
    CreateComment { number: u64, body: String },
    CloseItem(u64),
    MoveCard { card_id: u64, column_id: u64 },
}

pub(crate) struct ScriptedTracking {
    state: ItemState,
    column_name: String,
    calls: AsyncMutex<Vec<TrackingCall>>,
}

impl ScriptedTracking {
    pub(crate) fn new(state: ItemState, column_name: &str) -> Self {
        Self {
            state,
            column_name: column_name.to_string(),
            calls: AsyncMutex::new(Vec::new()),
        }
    }

    pub(crate) async fn calls(&self) -> Vec<TrackingCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: TrackingCall) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl TrackingApi for ScriptedTracking {
    async fn get_item(&self, number: u64) -> CardPostResult<TrackedItem> {
        self.record(TrackingCall::GetItem(number)).await;
        Ok(TrackedItem {
            number,
            state: self.state,
        })
    }

    async fn get_column(&self, column_id: u64) -> CardPostResult<ProjectColumn> {
        self.record(TrackingCall::GetColumn(column_id)).await;
        Ok(ProjectColumn {
            id: column_id,
            name: self.column_name.clone(),
            project_url: Some("https://api.github.com/projects/99".to_string()),
        })
    }

    async fn list_project_columns(&self, project_id: u64) -> CardPostResult<Vec<ProjectColumn>> {
        self.record(TrackingCall::ListProjectColumns(project_id))
            .await;
        Ok(vec![
            ProjectColumn {
                id: 7,
                name: "Ready to tweet".to_string(),
                project_url: None,
            },
            ProjectColumn {
                id: 8,
                name: "Tweeted".to_string(),
                project_url: None,
            },
        ])
    }

    async fn create_comment(&self, number: u64, body: &str) -> CardPostResult<()> {
        self.record(TrackingCall::CreateComment {
            number,
            body: body.to_string(),
        })
        .await;
        Ok(())
    }

    async fn close_item(&self, number: u64) -> CardPostResult<()> {
        self.record(TrackingCall::CloseItem(number)).await;
        Ok(())
    }

    async fn move_card(&self, card_id: u64, column_id: u64) -> CardPostResult<()> {
        self.record(TrackingCall::MoveCard { card_id, column_id })
            .await;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SocialCall {
    VerifyIdentity,
    PostStatus(PublishRequest),
    Repost { actor_id: String, target_id: String },
}

pub(crate) struct ScriptedSocial {
    calls: AsyncMutex<Vec<SocialCall>>,
}

impl ScriptedSocial {
    pub(crate) fn new() -> Self {
        Self {
            calls: AsyncMutex::new(Vec::new()),
        }
    }

    pub(crate) async fn calls(&self) -> Vec<SocialCall> {
        self.calls.lock().await.clone()
    }

    pub(crate) async fn posted_requests(&self) -> Vec<PublishRequest> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                SocialCall::PostStatus(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SocialApi for ScriptedSocial {
    async fn verify_identity(&self) -> CardPostResult<AccountIdentity> {
        self.calls.lock().await.push(SocialCall::VerifyIdentity);
        Ok(AccountIdentity {
            id: "777".to_string(),
            handle: "cardbot".to_string(),
        })
    }

    async fn post_status(&self, request: &PublishRequest) -> CardPostResult<String> {
        self.calls
            .lock()
            .await
            .push(SocialCall::PostStatus(request.clone()));
        Ok("1001".to_string())
    }

    async fn repost(&self, actor_id: &str, target_id: &str) -> CardPostResult<()> {
        self.calls.lock().await.push(SocialCall::Repost {
            actor_id: actor_id.to_string(),
            target_id: target_id.to_string(),
        });
        Ok(())
    }
}

pub(crate) struct ScriptedUploader {
    failing_urls: Vec<String>,
}

impl ScriptedUploader {
    pub(crate) fn new(failing_urls: &[&str]) -> Self {
        Self {
            failing_urls: failing_urls.iter().map(|url| url.to_string()).collect(),
        }
    }
}

#[async_trait]
impl MediaUploader for ScriptedUploader {
    async fn upload(&self, url: &str) -> CardPostResult<String> {
        if self.failing_urls.iter().any(|failing| failing == url) {
            return Err(CardPostError::collaborator("upload media", format!("rejected {url}")));
        }
        Ok(format!("media-{url}"))
    }
}
