use std::time::Duration;

use async_trait::async_trait;
use cardpost_core::{
    AccountIdentity, CardPostError, CardPostResult, PublishRequest, SocialApi,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::oauth1::{encode_form_body, OAuth1Credentials};

const ERROR_BODY_MAX_CHARS: usize = 600;

#[derive(Debug, Clone)]
/// Endpoints, credentials and timeout for [`TwitterApiClient`].
pub struct TwitterApiConfig {
    pub api_base: String,
    pub upload_base: String,
    pub credentials: OAuth1Credentials,
    pub request_timeout_ms: u64,
}

impl TwitterApiConfig {
    pub fn new(credentials: OAuth1Credentials) -> Self {
        Self {
            api_base: "https://api.twitter.com".to_string(),
            upload_base: "https://upload.twitter.com".to_string(),
            credentials,
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyCredentialsResponse {
    id_str: String,
    screen_name: String,
}

#[derive(Debug, Deserialize)]
struct StatusUpdateResponse {
    id_str: String,
}

#[derive(Debug, Deserialize)]
struct RetweetResponse {
    data: RetweetData,
}

#[derive(Debug, Deserialize)]
struct RetweetData {
    retweeted: bool,
}

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    media_id_string: String,
}

enum SignedBody {
    Empty,
    Form(Vec<(String, String)>),
    Json(Value),
}

#[derive(Clone)]
/// User-context client for the account that publishes card content.
pub struct TwitterApiClient {
    http: reqwest::Client,
    api_base: String,
    upload_base: String,
    credentials: OAuth1Credentials,
}

impl TwitterApiClient {
    pub fn new(config: TwitterApiConfig) -> CardPostResult<Self> {
        config.credentials.validate()?;
        let http = reqwest::Client::builder()
            .user_agent("cardpost")
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()
            .map_err(|error| {
                CardPostError::Config(format!("failed to create twitter api client: {error}"))
            })?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            upload_base: config.upload_base.trim_end_matches('/').to_string(),
            credentials: config.credentials,
        })
    }

    /// Upload base64-encoded image bytes, returning the platform media id.
    pub async fn upload_media_data(&self, media_data: String) -> CardPostResult<String> {
        let url = format!("{}/1.1/media/upload.json", self.upload_base);
        let response: MediaUploadResponse = self
            .send_signed(
                "upload media",
                Method::POST,
                &url,
                SignedBody::Form(vec![("media_data".to_string(), media_data)]),
            )
            .await?;
        Ok(response.media_id_string)
    }

    async fn send_signed<T>(
        &self,
        operation: &str,
        method: Method,
        url: &str,
        body: SignedBody,
    ) -> CardPostResult<T>
    where
        T: DeserializeOwned,
    {
        let signed_params: &[(String, String)] = match &body {
            SignedBody::Form(params) => params.as_slice(),
            SignedBody::Empty | SignedBody::Json(_) => &[],
        };
        let authorization =
            self.credentials
                .authorization_header(method.as_str(), url, signed_params)?;
        let mut request = self
            .http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, authorization);
        request = match body {
            SignedBody::Empty => request,
            SignedBody::Form(params) => request
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(encode_form_body(&params)),
            SignedBody::Json(value) => request.json(&value),
        };

        let operation = format!("twitter {operation}");
        let response = request
            .send()
            .await
            .map_err(|error| CardPostError::collaborator(&operation, error.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|error| {
                CardPostError::collaborator(
                    &operation,
                    format!("failed to decode response: {error}"),
                )
            });
        }
        let body = response.text().await.unwrap_or_default();
        Err(CardPostError::collaborator(
            &operation,
            format!(
                "status {}: {}",
                status.as_u16(),
                describe_twitter_error_body(&body)
            ),
        ))
    }
}

#[async_trait]
impl SocialApi for TwitterApiClient {
    async fn verify_identity(&self) -> CardPostResult<AccountIdentity> {
        let url = format!("{}/1.1/account/verify_credentials.json", self.api_base);
        let response: VerifyCredentialsResponse = self
            .send_signed("verify credentials", Method::GET, &url, SignedBody::Empty)
            .await?;
        Ok(AccountIdentity {
            id: response.id_str,
            handle: response.screen_name,
        })
    }

    async fn post_status(&self, request: &PublishRequest) -> CardPostResult<String> {
        let url = format!("{}/1.1/statuses/update.json", self.api_base);
        let params = status_update_params(request);
        debug!(
            reply = request.reply_target_id.is_some(),
            quote = request.attachment_url.is_some(),
            media = request.media_ids.len(),
            "posting status update"
        );
        let response: StatusUpdateResponse = self
            .send_signed("post status", Method::POST, &url, SignedBody::Form(params))
            .await?;
        Ok(response.id_str)
    }

    async fn repost(&self, actor_id: &str, target_id: &str) -> CardPostResult<()> {
        let url = format!("{}/2/users/{}/retweets", self.api_base, actor_id);
        let response: RetweetResponse = self
            .send_signed(
                "retweet",
                Method::POST,
                &url,
                SignedBody::Json(json!({ "tweet_id": target_id })),
            )
            .await?;
        if !response.data.retweeted {
            return Err(CardPostError::collaborator(
                "twitter retweet",
                format!("status {target_id} was not retweeted"),
            ));
        }
        Ok(())
    }
}

fn status_update_params(request: &PublishRequest) -> Vec<(String, String)> {
    let mut params = vec![("status".to_string(), request.text.clone())];
    if let Some(reply_target_id) = request.reply_target_id.as_ref() {
        params.push((
            "in_reply_to_status_id".to_string(),
            reply_target_id.clone(),
        ));
        if request.auto_populate_reply_metadata {
            params.push((
                "auto_populate_reply_metadata".to_string(),
                "true".to_string(),
            ));
        }
    }
    if let Some(attachment_url) = request.attachment_url.as_ref() {
        params.push(("attachment_url".to_string(), attachment_url.clone()));
    }
    if !request.media_ids.is_empty() {
        params.push(("media_ids".to_string(), request.media_ids.join(",")));
    }
    params
}

/// Readable summary of a platform error body (v1.1 `errors[]` or v2 problem).
fn describe_twitter_error_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let messages = value
            .get("errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|error| error.get("message").and_then(Value::as_str))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        if !messages.is_empty() {
            return messages.join("; ");
        }
        if let Some(detail) = value
            .get("detail")
            .or_else(|| value.get("title"))
            .and_then(Value::as_str)
        {
            return detail.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.chars().count() <= ERROR_BODY_MAX_CHARS {
        return trimmed.to_string();
    }
    let mut truncated = trimmed.chars().take(ERROR_BODY_MAX_CHARS).collect::<String>();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use cardpost_core::{CardPostError, PublishRequest, SocialApi};
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use serde_json::json;

    use super::{describe_twitter_error_body, TwitterApiClient, TwitterApiConfig};
    use crate::oauth1::OAuth1Credentials;

    fn credentials() -> OAuth1Credentials {
        OAuth1Credentials {
            consumer_key: "consumer-key".to_string(),
            consumer_secret: "consumer-secret".to_string(),
            access_token: "access-token".to_string(),
            access_token_secret: "access-secret".to_string(),
        }
    }

    fn client(server: &MockServer) -> TwitterApiClient {
        TwitterApiClient::new(TwitterApiConfig {
            api_base: server.base_url(),
            upload_base: format!("{}/upload", server.base_url()),
            credentials: credentials(),
            request_timeout_ms: 5_000,
        })
        .expect("twitter client")
    }

    #[tokio::test]
    async fn functional_verify_identity_reads_handle_and_id() {
        let server = MockServer::start();
        let verify = server.mock(|when, then| {
            when.method(GET)
                .path("/1.1/account/verify_credentials.json")
                .header_exists("authorization");
            then.status(200)
                .json_body(json!({"id_str": "777", "screen_name": "cardbot"}));
        });

        let identity = client(&server).verify_identity().await.expect("identity");

        verify.assert();
        assert_eq!(identity.id, "777");
        assert_eq!(identity.handle, "cardbot");
    }

    #[tokio::test]
    async fn functional_post_status_sends_reply_quote_and_media_fields() {
        let server = MockServer::start();
        let update = server.mock(|when, then| {
            when.method(POST)
                .path("/1.1/statuses/update.json")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(
                    "status=hello%20there&in_reply_to_status_id=42\
                     &auto_populate_reply_metadata=true\
                     &attachment_url=https%3A%2F%2Ftwitter.com%2Fbob%2Fstatus%2F999\
                     &media_ids=11%2C12",
                );
            then.status(200).json_body(json!({"id_str": "1001"}));
        });

        let request = PublishRequest {
            text: "hello there".to_string(),
            reply_target_id: Some("42".to_string()),
            attachment_url: Some("https://twitter.com/bob/status/999".to_string()),
            auto_populate_reply_metadata: true,
            media_ids: vec!["11".to_string(), "12".to_string()],
        };
        let id = client(&server).post_status(&request).await.expect("post");

        update.assert();
        assert_eq!(id, "1001");
    }

    #[tokio::test]
    async fn functional_repost_targets_actor_retweets_endpoint() {
        let server = MockServer::start();
        let retweet = server.mock(|when, then| {
            when.method(POST)
                .path("/2/users/777/retweets")
                .json_body(json!({"tweet_id": "999"}));
            then.status(200)
                .json_body(json!({"data": {"retweeted": true}}));
        });

        client(&server).repost("777", "999").await.expect("repost");

        retweet.assert();
    }

    #[tokio::test]
    async fn integration_upload_media_data_uses_upload_base() {
        let server = MockServer::start();
        let upload = server.mock(|when, then| {
            when.method(POST)
                .path("/upload/1.1/media/upload.json")
                .body("media_data=aGVsbG8%3D");
            then.status(200)
                .json_body(json!({"media_id": 5, "media_id_string": "5"}));
        });

        let media_id = client(&server)
            .upload_media_data("aGVsbG8=".to_string())
            .await
            .expect("upload");

        upload.assert();
        assert_eq!(media_id, "5");
    }

    #[tokio::test]
    async fn regression_platform_rejection_is_a_collaborator_error() {
        let server = MockServer::start();
        let update = server.mock(|when, then| {
            when.method(POST).path("/1.1/statuses/update.json");
            then.status(403).json_body(
                json!({"errors": [{"code": 187, "message": "Status is a duplicate."}]}),
            );
        });

        let error = client(&server)
            .post_status(&PublishRequest {
                text: "again".to_string(),
                ..PublishRequest::default()
            })
            .await
            .expect_err("duplicate");

        update.assert_hits(1);
        assert!(matches!(error, CardPostError::Collaborator { .. }));
        assert_eq!(
            error.to_string(),
            "twitter post status failed: status 403: Status is a duplicate."
        );
    }

    #[test]
    fn unit_describe_error_body_handles_problem_and_plain_bodies() {
        assert_eq!(
            describe_twitter_error_body(r#"{"title": "Forbidden", "detail": "not permitted"}"#),
            "not permitted"
        );
        assert_eq!(describe_twitter_error_body(" gateway down "), "gateway down");
        assert!(describe_twitter_error_body(&"x".repeat(700)).ends_with("..."));
    }

    #[test]
    fn regression_new_rejects_incomplete_credentials() {
        let mut incomplete = credentials();
        incomplete.access_token_secret.clear();
        let result = TwitterApiClient::new(TwitterApiConfig::new(incomplete));
        assert!(matches!(result, Err(CardPostError::Config(_))));
    }
}
