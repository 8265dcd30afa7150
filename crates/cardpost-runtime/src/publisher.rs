use cardpost_core::{
    compose_publish_request, status_permalink, CardPostError, CardPostResult, IntentKind,
    MediaUploader, ParsedIntent, PublishResult, SocialApi,
};
use futures_util::future::try_join_all;
use tracing::info;

pub const REPOST_RESULT_MESSAGE: &str = "Successfully retweeted.";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a publish call and the comment text reported back to the item.
pub struct Publication {
    pub result: PublishResult,
    pub message: String,
}

/// Publish `intent` as a repost or as a post/reply/quote.
///
/// The account identity is resolved once; reposts need its id as the actor and
/// posts need its handle for the permalink.
pub async fn publish_intent(
    social: &dyn SocialApi,
    uploader: Option<&dyn MediaUploader>,
    intent: &ParsedIntent,
) -> CardPostResult<Publication> {
    match intent.kind {
        IntentKind::Repost => {
            let target_id = intent.repost_target_id.as_deref().ok_or_else(|| {
                CardPostError::lookup("repost intent is missing its target status id")
            })?;
            let identity = social.verify_identity().await?;
            social.repost(&identity.id, target_id).await?;
            info!(target_id, account = %identity.handle, "reposted status");
            Ok(Publication {
                result: PublishResult {
                    post_id: target_id.to_string(),
                    permalink: None,
                },
                message: REPOST_RESULT_MESSAGE.to_string(),
            })
        }
        IntentKind::Post => {
            let mut request = compose_publish_request(intent, uploader.is_some())?;
            let identity = social.verify_identity().await?;
            if let Some(uploader) = uploader {
                request.media_ids = upload_media(uploader, &intent.media_urls).await?;
            }
            let post_id = social.post_status(&request).await?;
            let permalink = status_permalink(&identity.handle, &post_id);
            info!(%post_id, %permalink, "published status");
            Ok(Publication {
                message: format!("Successfully tweeted: {permalink}"),
                result: PublishResult {
                    post_id,
                    permalink: Some(permalink),
                },
            })
        }
    }
}

/// Upload every media URL concurrently; ids keep the order of `urls` and the
/// first failure aborts the whole batch.
pub async fn upload_media(
    uploader: &dyn MediaUploader,
    urls: &[String],
) -> CardPostResult<Vec<String>> {
    if urls.is_empty() {
        return Ok(Vec::new());
    }
    try_join_all(urls.iter().map(|url| uploader.upload(url))).await
}
