use serde::Deserialize;
use thiserror::Error;

use crate::transport::Response;

const REQUESTS_REMAINING_HEADER: &str = "x-dnsme-requestsremaining";
const REQUEST_LIMIT_HEADER: &str = "x-dnsme-requestlimit";

/// Error returned by the DNS Made Easy API for any response with a status of 400 or above.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("API error {code}: {}", .messages.join(" "))]
pub struct ApiError {
    /// HTTP status code of the response.
    pub code: u16,
    /// Messages from the `error` array of the response body, if it had one.
    pub messages: Vec<String>,
    /// Value of the `x-dnsme-requestsRemaining` header, if sent.
    pub requests_remaining: Option<u32>,
    /// Value of the `x-dnsme-requestLimit` header, if sent.
    pub request_limit: Option<u32>,
}

impl ApiError {
    pub(crate) fn from_response(resp: &Response) -> Self {
        #[derive(Deserialize)]
        struct ErrorResp {
            #[serde(default)]
            error: Vec<String>,
        }

        let messages = serde_json::from_slice::<ErrorResp>(&resp.body)
            .map(|r| r.error)
            .unwrap_or_default();

        Self {
            code: resp.status.as_u16(),
            messages,
            requests_remaining: resp.header_u32(REQUESTS_REMAINING_HEADER),
            request_limit: resp.header_u32(REQUEST_LIMIT_HEADER),
        }
    }

    /// Whether the provider refused the request because the rate limit was hit.
    ///
    /// DNS Made Easy reports rate limiting with a 400-class status, so besides
    /// `429 Too Many Requests` this looks at the remaining-requests header and at
    /// the returned messages. Any other 400 is a genuine client error and should
    /// not be retried.
    pub fn is_rate_limited(&self) -> bool {
        if self.code == 429 || self.requests_remaining == Some(0) {
            return true;
        }

        (400..500).contains(&self.code)
            && self.messages.iter().any(|m| {
                let m = m.to_ascii_lowercase();
                m.contains("rate limit") || m.contains("too many requests")
            })
    }
}

/// A request could not be sent, or its response could not be received.
#[derive(Error, Debug)]
#[error("transport error: {0}")]
pub struct TransportError(#[from] Box<dyn std::error::Error + Send + Sync>);

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self(Box::new(value))
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("unable to encode or decode JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("record has no id; it must be created before it can be updated")]
    MissingRecordId,
}

impl ClientError {
    /// Returns the API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientBuilderError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
