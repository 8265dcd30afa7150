//! Single-pass card publishing pipeline: gate on the card's column, parse and
//! compose the post, publish it, then report back to the tracked item.

pub mod completion_reporter;
pub mod content_resolver;
pub mod pipeline;
pub mod publisher;
pub mod run_config;

#[cfg(test)]
mod test_support;

pub use pipeline::{
    run_card_pipeline, triggering_item, Collaborators, RunOutcome, SkipReason,
};
pub use run_config::RunConfig;
