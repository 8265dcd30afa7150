//! Twitter client for the card publishing workflow: OAuth 1.0a request
//! signing, status updates, retweets and the optional media uploader.

pub mod media_upload;
pub mod oauth1;
pub mod twitter_api_client;

pub use media_upload::TwitterMediaUploader;
pub use oauth1::OAuth1Credentials;
pub use twitter_api_client::{TwitterApiClient, TwitterApiConfig};
