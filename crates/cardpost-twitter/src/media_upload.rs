use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cardpost_core::{CardPostError, CardPostResult, MediaUploader};
use tracing::info;

use crate::twitter_api_client::TwitterApiClient;

/// Platform limit for a single image upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
struct FetchedImage {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

#[derive(Clone)]
/// Fetches card images over HTTP and uploads them as base64 `media_data`.
pub struct TwitterMediaUploader {
    http: reqwest::Client,
    twitter: TwitterApiClient,
}

impl TwitterMediaUploader {
    pub fn new(twitter: TwitterApiClient, request_timeout_ms: u64) -> CardPostResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent("cardpost")
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .map_err(|error| {
                CardPostError::Config(format!("failed to create media fetch client: {error}"))
            })?;
        Ok(Self { http, twitter })
    }

    async fn fetch_image(&self, url: &str) -> CardPostResult<FetchedImage> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|_| CardPostError::validation(format!("Invalid image URL: {url}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CardPostError::validation(format!(
                "Image URL must use http or https: {url}"
            )));
        }

        let operation = "fetch image";
        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|error| CardPostError::collaborator(operation, error.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CardPostError::collaborator(
                operation,
                format!("status {} for {url}", status.as_u16()),
            ));
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = response
            .bytes()
            .await
            .map_err(|error| CardPostError::collaborator(operation, error.to_string()))?;
        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

fn check_image(url: &str, image: &FetchedImage) -> CardPostResult<()> {
    if let Some(content_type) = image.content_type.as_deref() {
        if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
            return Err(CardPostError::validation(format!(
                "{url} is not an image (content type {content_type})"
            )));
        }
    }
    if image.bytes.is_empty() {
        return Err(CardPostError::validation(format!("{url} returned no data")));
    }
    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(CardPostError::validation(format!(
            "{url} exceeds the {MAX_IMAGE_BYTES} byte image limit"
        )));
    }
    Ok(())
}

#[async_trait]
impl MediaUploader for TwitterMediaUploader {
    async fn upload(&self, url: &str) -> CardPostResult<String> {
        let image = self.fetch_image(url).await?;
        check_image(url, &image)?;
        let media_id = self
            .twitter
            .upload_media_data(STANDARD.encode(&image.bytes))
            .await?;
        info!(%url, %media_id, bytes = image.bytes.len(), "uploaded media");
        Ok(media_id)
    }
}
