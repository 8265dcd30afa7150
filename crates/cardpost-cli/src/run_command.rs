use anyhow::Result;
use cardpost_core::{CardPostError, CardPostResult, MediaUploader, PayloadFieldMap};
use cardpost_github::{load_card_event, GithubApiClient, GithubApiConfig, RepoRef};
use cardpost_runtime::{
    run_card_pipeline, triggering_item, Collaborators, RunConfig, RunOutcome, SkipReason,
};
use cardpost_twitter::{
    OAuth1Credentials, TwitterApiClient, TwitterApiConfig, TwitterMediaUploader,
};
use tracing::info;

use crate::cli_args::Cli;

fn required(value: &str, name: &str) -> CardPostResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CardPostError::Config(format!("input '{name}' is required")));
    }
    Ok(trimmed.to_string())
}

fn field_or_default(value: &str, default: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed.to_string()
    }
}

/// Build the per-run configuration from parsed arguments.
pub fn build_run_config(cli: &Cli) -> CardPostResult<RunConfig> {
    let defaults = PayloadFieldMap::default();
    Ok(RunConfig {
        column: required(&cli.column, "column")?,
        done_column: cli
            .done_column
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string),
        card_content: required(&cli.card_content, "cardContent")?,
        field_map: PayloadFieldMap {
            content: field_or_default(&cli.tweet_content_field, defaults.content),
            repost: field_or_default(&cli.retweet_field, defaults.repost),
            reply_to: field_or_default(&cli.reply_to_field, defaults.reply_to),
        },
    })
}

fn build_github_client(cli: &Cli, repo: RepoRef) -> CardPostResult<GithubApiClient> {
    GithubApiClient::new(GithubApiConfig {
        api_base: cli.github_api_base.clone(),
        token: required(&cli.token, "token")?,
        repo,
        request_timeout_ms: cli.request_timeout_ms,
    })
}

fn build_twitter_client(cli: &Cli) -> CardPostResult<TwitterApiClient> {
    TwitterApiClient::new(TwitterApiConfig {
        api_base: cli.twitter_api_base.clone(),
        upload_base: cli.twitter_upload_base.clone(),
        credentials: OAuth1Credentials {
            consumer_key: cli.twitter_consumer_key.trim().to_string(),
            consumer_secret: cli.twitter_consumer_secret.trim().to_string(),
            access_token: cli.twitter_access_token_key.trim().to_string(),
            access_token_secret: cli.twitter_access_token_secret.trim().to_string(),
        },
        request_timeout_ms: cli.request_timeout_ms,
    })
}

/// Run one publishing pass for the event described by `cli`.
pub async fn execute(cli: &Cli) -> Result<RunOutcome> {
    let card = load_card_event(&cli.event_path)?;
    if triggering_item(card.as_ref()).is_none() {
        let reason = SkipReason::NoTrackedItem;
        info!("{}", reason.describe());
        return Ok(RunOutcome::Skipped(reason));
    }

    let config = build_run_config(cli)?;
    let repo = RepoRef::parse(&cli.repository)?;
    info!(repository = %repo.as_slug(), "processing project card event");
    let github = build_github_client(cli, repo)?;
    let twitter = build_twitter_client(cli)?;
    let uploader = if cli.media_upload {
        Some(TwitterMediaUploader::new(
            twitter.clone(),
            cli.request_timeout_ms,
        )?)
    } else {
        None
    };

    let outcome = run_card_pipeline(
        &config,
        card.as_ref(),
        Collaborators {
            tracking: &github,
            social: &twitter,
            uploader: uploader
                .as_ref()
                .map(|uploader| uploader as &dyn MediaUploader),
        },
    )
    .await?;
    Ok(outcome)
}
