use std::path::PathBuf;

use clap::{ArgAction, Parser};

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

/// Action inputs arrive as strings and unset inputs as empty strings.
fn parse_input_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "off" => Ok(false),
        "true" | "1" | "yes" | "on" => Ok(true),
        other => Err(format!("expected true or false, got '{other}'")),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "cardpost",
    about = "Publish project card content as a tweet when the card reaches a column",
    version
)]
/// Command-line and GitHub Actions input surface for a publishing run.
pub struct Cli {
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true, help = "GitHub token")]
    pub token: String,

    #[arg(
        long,
        env = "INPUT_COLUMN",
        help = "Name of the project column whose cards get published"
    )]
    pub column: String,

    #[arg(
        long = "done-column",
        env = "INPUT_DONECOLUMN",
        help = "Column cards are moved to after publishing"
    )]
    pub done_column: Option<String>,

    #[arg(
        long = "card-content",
        env = "INPUT_CARDCONTENT",
        help = "JSON payload describing the tweet (content, repost, replyTo, date)"
    )]
    pub card_content: String,

    #[arg(
        long = "twitter-consumer-key",
        env = "INPUT_TWITTERCONSUMERKEY",
        hide_env_values = true,
        default_value = ""
    )]
    pub twitter_consumer_key: String,

    #[arg(
        long = "twitter-consumer-secret",
        env = "INPUT_TWITTERCONSUMERSECRET",
        hide_env_values = true,
        default_value = ""
    )]
    pub twitter_consumer_secret: String,

    #[arg(
        long = "twitter-access-token-key",
        env = "INPUT_TWITTERACCESSTOKENKEY",
        hide_env_values = true,
        default_value = ""
    )]
    pub twitter_access_token_key: String,

    #[arg(
        long = "twitter-access-token-secret",
        env = "INPUT_TWITTERACCESSTOKENSECRET",
        hide_env_values = true,
        default_value = ""
    )]
    pub twitter_access_token_secret: String,

    #[arg(
        long = "tweet-content-field",
        env = "INPUT_TWEETCONTENT",
        default_value = "content",
        help = "Card content field holding the tweet text"
    )]
    pub tweet_content_field: String,

    #[arg(
        long = "retweet-field",
        env = "INPUT_RETWEETHEADING",
        default_value = "repost",
        help = "Card content field holding the URL to retweet or quote"
    )]
    pub retweet_field: String,

    #[arg(
        long = "reply-to-field",
        env = "INPUT_REPLYTOHEADING",
        default_value = "replyTo",
        help = "Card content field holding the URL to reply to"
    )]
    pub reply_to_field: String,

    #[arg(
        long = "media-upload",
        env = "INPUT_MEDIAUPLOAD",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_input_bool,
        help = "Upload Markdown images in the tweet text instead of rejecting them"
    )]
    pub media_upload: bool,

    #[arg(
        long = "event-path",
        env = "GITHUB_EVENT_PATH",
        help = "Path of the webhook event payload that triggered the run"
    )]
    pub event_path: PathBuf,

    #[arg(
        long,
        env = "GITHUB_REPOSITORY",
        help = "Repository in owner/name format"
    )]
    pub repository: String,

    #[arg(
        long = "github-api-base",
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com"
    )]
    pub github_api_base: String,

    #[arg(
        long = "twitter-api-base",
        env = "CARDPOST_TWITTER_API_BASE",
        default_value = "https://api.twitter.com"
    )]
    pub twitter_api_base: String,

    #[arg(
        long = "twitter-upload-base",
        env = "CARDPOST_TWITTER_UPLOAD_BASE",
        default_value = "https://upload.twitter.com"
    )]
    pub twitter_upload_base: String,

    #[arg(
        long = "request-timeout-ms",
        env = "CARDPOST_REQUEST_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = parse_positive_u64,
        help = "Timeout for each GitHub and Twitter HTTP request"
    )]
    pub request_timeout_ms: u64,
}
