use thiserror::Error;

/// Convenience alias used by every pipeline step.
pub type CardPostResult<T> = Result<T, CardPostError>;

#[derive(Debug, Error)]
/// Enumerates fatal failures that abort a card publishing run.
///
/// Gate skips (wrong column, closed item, scheduled content) are not errors
/// and never surface through this type.
pub enum CardPostError {
    /// Payload or composed post violates a publishing rule.
    #[error("{0}")]
    Validation(String),
    /// A referenced post, author or column could not be resolved.
    #[error("{0}")]
    Lookup(String),
    /// The tracking system or the social platform rejected a call.
    #[error("{operation} failed: {message}")]
    Collaborator { operation: String, message: String },
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CardPostError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup(message.into())
    }

    pub fn collaborator(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Stable snake_case label used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Lookup(_) => "lookup",
            Self::Collaborator { .. } => "collaborator",
            Self::Config(_) => "config",
        }
    }
}
