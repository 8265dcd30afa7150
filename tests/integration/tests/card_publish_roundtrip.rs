use cardpost_core::{CardEvent, CardPostError, MediaUploader};
use cardpost_github::{parse_card_event, GithubApiClient, GithubApiConfig, RepoRef};
use cardpost_runtime::{run_card_pipeline, Collaborators, RunConfig, RunOutcome};
use cardpost_twitter::{
    OAuth1Credentials, TwitterApiClient, TwitterApiConfig, TwitterMediaUploader,
};
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::json;

struct Harness {
    github: GithubApiClient,
    twitter: TwitterApiClient,
}

impl Harness {
    fn new(server: &MockServer) -> Self {
        let github = GithubApiClient::new(GithubApiConfig {
            api_base: server.base_url(),
            token: "gh-token".to_string(),
            repo: RepoRef::parse("octo/board").expect("repo"),
            request_timeout_ms: 5_000,
        })
        .expect("github client");
        let mut config = TwitterApiConfig::new(OAuth1Credentials {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            access_token: "at".to_string(),
            access_token_secret: "as".to_string(),
        });
        config.api_base = server.base_url();
        config.upload_base = server.base_url();
        config.request_timeout_ms = 5_000;
        let twitter = TwitterApiClient::new(config).expect("twitter client");
        Self { github, twitter }
    }

    async fn run(
        &self,
        config: &RunConfig,
        card: &CardEvent,
        uploader: Option<&dyn MediaUploader>,
    ) -> Result<RunOutcome, CardPostError> {
        run_card_pipeline(
            config,
            Some(card),
            Collaborators {
                tracking: &self.github,
                social: &self.twitter,
                uploader,
            },
        )
        .await
    }
}

fn moved_card() -> CardEvent {
    let raw = json!({
        "action": "moved",
        "project_card": {
            "id": 31,
            "column_id": 7,
            "content_url": "https://api.github.com/repos/octo/board/issues/12"
        }
    });
    parse_card_event(&raw.to_string())
        .expect("event")
        .expect("card")
}

fn mock_open_item_in_ready_column(server: &MockServer) -> (Mock<'_>, Mock<'_>) {
    let issue = server.mock(|when, then| {
        when.method(GET).path("/repos/octo/board/issues/12");
        then.status(200)
            .json_body(json!({"number": 12, "state": "open"}));
    });
    let column = server.mock(|when, then| {
        when.method(GET).path("/projects/columns/7");
        then.status(200).json_body(json!({
            "id": 7,
            "name": "Ready to tweet",
            "project_url": format!("{}/projects/99", server.base_url())
        }));
    });
    (issue, column)
}

fn mock_identity(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/1.1/account/verify_credentials.json");
        then.status(200)
            .json_body(json!({"id_str": "777", "screen_name": "cardbot"}));
    })
}

fn mock_comment_and_close<'a>(server: &'a MockServer, body: &str) -> (Mock<'a>, Mock<'a>) {
    let comment = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/octo/board/issues/12/comments")
            .json_body(json!({ "body": body }));
        then.status(201).json_body(json!({"id": 1}));
    });
    let close = server.mock(|when, then| {
        when.method(PATCH)
            .path("/repos/octo/board/issues/12")
            .json_body(json!({"state": "closed"}));
        then.status(200)
            .json_body(json!({"number": 12, "state": "closed"}));
    });
    (comment, close)
}

#[tokio::test]
async fn integration_reply_with_media_is_posted_and_card_moved_to_done_column() {
    let server = MockServer::start();
    let (issue, column) = mock_open_item_in_ready_column(&server);
    let identity = mock_identity(&server);
    let image = server.mock(|when, then| {
        when.method(GET).path("/assets/chart.png");
        then.status(200)
            .header("content-type", "image/png")
            .body("png-bytes");
    });
    let upload = server.mock(|when, then| {
        when.method(POST).path("/1.1/media/upload.json");
        then.status(200)
            .json_body(json!({"media_id_string": "5550"}));
    });
    let update = server.mock(|when, then| {
        when.method(POST).path("/1.1/statuses/update.json").body(
            "status=Release%20notes%20are%20out&in_reply_to_status_id=42\
             &auto_populate_reply_metadata=true&media_ids=5550",
        );
        then.status(200).json_body(json!({"id_str": "1001"}));
    });
    let (comment, close) = mock_comment_and_close(
        &server,
        "Successfully tweeted: https://twitter.com/cardbot/status/1001",
    );
    let columns = server.mock(|when, then| {
        when.method(GET).path("/projects/99/columns");
        then.status(200).json_body(json!([
            {"id": 7, "name": "Ready to tweet"},
            {"id": 8, "name": "Tweeted"}
        ]));
    });
    let moved = server.mock(|when, then| {
        when.method(POST)
            .path("/projects/columns/cards/31/moves")
            .json_body(json!({"position": "top", "column_id": 8}));
        then.status(201).json_body(json!({}));
    });

    let harness = Harness::new(&server);
    let uploader = TwitterMediaUploader::new(harness.twitter.clone(), 5_000).expect("uploader");
    let content = json!({
        "content": format!("Release notes are out ![chart]({})", server.url("/assets/chart.png")),
        "replyTo": "https://twitter.com/alice/status/42"
    });
    let mut config = RunConfig::new("Ready to tweet", content.to_string());
    config.done_column = Some("Tweeted".to_string());

    let outcome = harness
        .run(&config, &moved_card(), Some(&uploader))
        .await
        .expect("run");

    let RunOutcome::Published(publication) = outcome else {
        panic!("expected publication");
    };
    assert_eq!(publication.result.post_id, "1001");
    for mock in [
        &issue, &column, &identity, &image, &upload, &update, &comment, &close, &columns, &moved,
    ] {
        mock.assert();
    }
}

#[tokio::test]
async fn integration_repost_uses_v2_retweet_and_reports_fixed_message() {
    let server = MockServer::start();
    let (issue, column) = mock_open_item_in_ready_column(&server);
    let identity = mock_identity(&server);
    let retweet = server.mock(|when, then| {
        when.method(POST)
            .path("/2/users/777/retweets")
            .json_body(json!({"tweet_id": "999"}));
        then.status(200)
            .json_body(json!({"data": {"retweeted": true}}));
    });
    let (comment, close) = mock_comment_and_close(&server, "Successfully retweeted.");

    let harness = Harness::new(&server);
    let config = RunConfig::new(
        "Ready to tweet",
        r#"{"content": "", "repost": "https://x.com/bob/status/999"}"#,
    );

    let outcome = harness
        .run(&config, &moved_card(), None)
        .await
        .expect("run");

    assert!(matches!(outcome, RunOutcome::Published(_)));
    for mock in [&issue, &column, &identity, &retweet, &comment, &close] {
        mock.assert();
    }
}

#[tokio::test]
async fn regression_missing_done_column_fails_after_post_and_close() {
    let server = MockServer::start();
    let (_issue, _column) = mock_open_item_in_ready_column(&server);
    let _identity = mock_identity(&server);
    let update = server.mock(|when, then| {
        when.method(POST).path("/1.1/statuses/update.json");
        then.status(200).json_body(json!({"id_str": "1001"}));
    });
    let (comment, close) = mock_comment_and_close(
        &server,
        "Successfully tweeted: https://twitter.com/cardbot/status/1001",
    );
    server.mock(|when, then| {
        when.method(GET).path("/projects/99/columns");
        then.status(200)
            .json_body(json!([{"id": 7, "name": "Ready to tweet"}]));
    });
    let moved = server.mock(|when, then| {
        when.method(POST).path("/projects/columns/cards/31/moves");
        then.status(201).json_body(json!({}));
    });

    let harness = Harness::new(&server);
    let mut config = RunConfig::new("Ready to tweet", r#"{"content": "Hello"}"#);
    config.done_column = Some("Archive".to_string());

    let error = harness
        .run(&config, &moved_card(), None)
        .await
        .expect_err("missing column");

    assert!(matches!(error, CardPostError::Lookup(_)));
    assert_eq!(error.to_string(), "Column Archive not found");
    update.assert();
    comment.assert();
    close.assert();
    moved.assert_hits(0);
}
