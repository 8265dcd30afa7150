use cardpost_core::PayloadFieldMap;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-run settings shared by every pipeline step.
pub struct RunConfig {
    /// Column a card must sit in for its content to be published.
    pub column: String,
    /// Column the card moves to once published; unset keeps the card in place.
    pub done_column: Option<String>,
    /// Raw JSON payload describing the post.
    pub card_content: String,
    pub field_map: PayloadFieldMap,
}

impl RunConfig {
    pub fn new(column: impl Into<String>, card_content: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            done_column: None,
            card_content: card_content.into(),
            field_map: PayloadFieldMap::default(),
        }
    }
}
