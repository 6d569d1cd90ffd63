//! The HTTP layer the client sends its signed requests through.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::TransportError;

/// A fully built and signed request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// JSON body, if the operation sends one.
    pub body: Option<Vec<u8>>,
}

/// The raw response to a [Request].
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    /// Parses the named header as a `u32`, if present and well-formed.
    pub(crate) fn header_u32(&self, name: &str) -> Option<u32> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }
}

/// Sends requests and returns their responses.
///
/// Connection errors, timeouts and failures to read the body are reported as
/// [TransportError]s. Any status code, including 4xx and 5xx, is a successful
/// [Response] at this level.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// [Transport] backed by a blocking [reqwest] client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport with certificate validation enabled.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_options(None, false)
    }

    /// Creates a transport with an optional timeout.
    ///
    /// `accept_invalid_certs` disables TLS certificate validation. Only ever set it
    /// when talking to a sandbox you trust.
    pub fn with_options(
        timeout: Option<Duration>,
        accept_invalid_certs: bool,
    ) -> Result<Self, TransportError> {
        let mut builder =
            reqwest::blocking::Client::builder().danger_accept_invalid_certs(accept_invalid_certs);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if accept_invalid_certs {
            log::warn!("TLS certificate validation is disabled");
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl From<reqwest::blocking::Client> for HttpTransport {
    fn from(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> Result<Response, TransportError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let resp = builder.send()?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes()?.to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
