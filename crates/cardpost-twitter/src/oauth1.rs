//! OAuth 1.0a (HMAC-SHA1) request signing for user-context API calls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cardpost_core::{CardPostError, CardPostResult};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256};

static NONCE_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Clone)]
/// Consumer key pair plus the access token pair of the posting account.
pub struct OAuth1Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for OAuth1Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

impl OAuth1Credentials {
    pub fn validate(&self) -> CardPostResult<()> {
        let missing = [
            ("consumer key", &self.consumer_key),
            ("consumer secret", &self.consumer_secret),
            ("access token", &self.access_token),
            ("access token secret", &self.access_token_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect::<Vec<_>>();
        if missing.is_empty() {
            return Ok(());
        }
        Err(CardPostError::Config(format!(
            "missing twitter credentials: {}",
            missing.join(", ")
        )))
    }

    /// `Authorization` header value for a request with a fresh nonce.
    ///
    /// `params` holds the query string and form body pairs; JSON bodies are
    /// not part of the signature.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
    ) -> CardPostResult<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        self.authorization_header_with(method, url, params, &generate_nonce(), timestamp)
    }

    pub(crate) fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: u64,
    ) -> CardPostResult<String> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            (
                "oauth_signature_method".to_string(),
                "HMAC-SHA1".to_string(),
            ),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_token".to_string(), self.access_token.clone()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        let signature = self.signature(method, url, params, &oauth_params)?;
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let fields = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        oauth_params: &[(String, String)],
    ) -> CardPostResult<String> {
        let mut encoded = params
            .iter()
            .chain(oauth_params.iter())
            .map(|(key, value)| (percent_encode(key), percent_encode(value)))
            .collect::<Vec<_>>();
        encoded.sort();
        let parameter_string = encoded
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let base_string = format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            percent_encode(url),
            percent_encode(&parameter_string)
        );
        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(&self.access_token_secret)
        );
        let mut mac = Hmac::<Sha1>::new_from_slice(signing_key.as_bytes())
            .map_err(|_| CardPostError::Config("failed to initialize oauth signer".into()))?;
        mac.update(base_string.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// RFC 3986 encoding: everything except unreserved characters is escaped.
pub fn percent_encode(value: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut encoded = String::with_capacity(value.len());
    for byte in value.as_bytes() {
        let is_unreserved = matches!(
            byte,
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~'
        );
        if is_unreserved {
            encoded.push(*byte as char);
        } else {
            encoded.push('%');
            encoded.push(HEX[(byte >> 4) as usize] as char);
            encoded.push(HEX[(byte & 0x0F) as usize] as char);
        }
    }
    encoded
}

/// `application/x-www-form-urlencoded` body using the signing encoding.
pub fn encode_form_body(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn generate_nonce() -> String {
    let counter = NONCE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let digest = Sha256::digest(format!("{nanos}:{counter}:{}", std::process::id()).as_bytes());
    digest
        .iter()
        .take(16)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
