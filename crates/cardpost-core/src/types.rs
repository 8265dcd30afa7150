use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `ItemState` values.
pub enum ItemState {
    Open,
    Closed,
}

impl ItemState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Issue or pull request backing a project card.
pub struct TrackedItem {
    pub number: u64,
    pub state: ItemState,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Column of a project board.
pub struct ProjectColumn {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub project_url: Option<String>,
}

impl ProjectColumn {
    /// Numeric project id taken from the trailing `/projects/<id>` segment.
    pub fn project_id(&self) -> Option<u64> {
        let url = self.project_url.as_deref()?;
        let (prefix, id) = url.trim_end_matches('/').rsplit_once('/')?;
        if !prefix.ends_with("/projects") {
            return None;
        }
        id.parse::<u64>().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// `project_card` object of the triggering GitHub event.
pub struct CardEvent {
    #[serde(rename = "id")]
    pub card_id: u64,
    pub column_id: u64,
    #[serde(default)]
    pub content_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Post,
    Repost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Canonical reading of a card payload, before any platform call.
pub struct ParsedIntent {
    pub kind: IntentKind,
    pub text: String,
    pub media_urls: Vec<String>,
    pub repost_url: Option<String>,
    pub reply_to_url: Option<String>,
    pub repost_target_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Platform-ready status update.
pub struct PublishRequest {
    pub text: String,
    pub reply_target_id: Option<String>,
    pub attachment_url: Option<String>,
    pub auto_populate_reply_metadata: bool,
    pub media_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Authenticated platform account.
pub struct AccountIdentity {
    pub id: String,
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    /// Id of the newly created post, or of the reposted status for a repost.
    pub post_id: String,
    /// Absent for reposts, which do not create a post of their own.
    pub permalink: Option<String>,
}
