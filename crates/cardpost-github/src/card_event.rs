use std::path::Path;

use cardpost_core::{CardEvent, CardPostError, CardPostResult};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Repository coordinates in `owner/name` form.
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn parse(raw: &str) -> CardPostResult<Self> {
        let trimmed = raw.trim();
        let (owner, name) = trimmed.split_once('/').ok_or_else(|| {
            CardPostError::Config(format!(
                "repository '{trimmed}' must use owner/name format"
            ))
        })?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(CardPostError::Config(format!(
                "repository '{trimmed}' must use owner/name format"
            )));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(default)]
    project_card: Option<CardEvent>,
}

/// Extract the `project_card` object from a webhook event payload.
///
/// Events that do not concern a project card yield `None`.
pub fn parse_card_event(raw: &str) -> CardPostResult<Option<CardEvent>> {
    let envelope: EventEnvelope = serde_json::from_str(raw).map_err(|error| {
        CardPostError::Config(format!("failed to parse github event payload: {error}"))
    })?;
    Ok(envelope.project_card)
}

pub fn load_card_event(path: &Path) -> CardPostResult<Option<CardEvent>> {
    let raw = std::fs::read_to_string(path).map_err(|error| {
        CardPostError::Config(format!(
            "failed to read github event payload {}: {error}",
            path.display()
        ))
    })?;
    parse_card_event(&raw)
}
