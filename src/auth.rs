//! Request signing.
//!
//! Every request carries the API key, the current date and an HMAC-SHA1 of that
//! date keyed with the API secret. The provider recomputes the HMAC from the date
//! header, so the signed string and the header value must be byte-identical.

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

pub const API_KEY_HEADER: &str = "x-dnsme-apikey";
pub const REQUEST_DATE_HEADER: &str = "x-dnsme-requestdate";
pub const HMAC_HEADER: &str = "x-dnsme-hmac";

/// Formats `now` as an RFC 1123 date in UTC, e.g. `Mon, 02 Jan 2006 15:04:05 UTC`.
pub fn request_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S UTC").to_string()
}

/// The API key and secret used to sign requests.
#[derive(Clone)]
pub(crate) struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub(crate) fn new(api_key: &str, api_secret: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Lowercase hex HMAC-SHA1 of `request_date`, keyed with the API secret.
    pub(crate) fn sign(&self, request_date: &str) -> String {
        let mut mac = HmacSha1::new_from_slice(self.api_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(request_date.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Builds the authentication headers for a request sent at `now`.
    pub(crate) fn headers(&self, now: DateTime<Utc>) -> Result<HeaderMap, InvalidHeaderValue> {
        let date = request_date(now);
        let hmac = self.sign(&date);

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(API_KEY_HEADER),
            HeaderValue::from_str(&self.api_key)?,
        );
        headers.insert(
            HeaderName::from_static(REQUEST_DATE_HEADER),
            HeaderValue::from_str(&date)?,
        );
        headers.insert(
            HeaderName::from_static(HMAC_HEADER),
            HeaderValue::from_str(&hmac)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(headers)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
