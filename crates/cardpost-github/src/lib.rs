//! GitHub side of the card publishing workflow: the triggering event payload
//! and the REST client used to read issues and project boards and to report
//! results back.

pub mod card_event;
pub mod github_api_client;
mod github_transport_helpers;

pub use card_event::{load_card_event, parse_card_event, RepoRef};
pub use github_api_client::{GithubApiClient, GithubApiConfig};
