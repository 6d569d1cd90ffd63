use std::time::Duration;

use chrono::Utc;
use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use strum_macros::{Display, EnumString};
use url::Url;

use crate::auth::Credentials;
use crate::domain::{Domain, DomainList, DomainUpdate};
use crate::record::{DomainRecords, Record};
use crate::transport::{HttpTransport, Request, Transport};
use crate::{ApiError, ClientBuilderError, ClientError, Payload};

/// API version used unless another one is configured.
pub const DEFAULT_VERSION: &str = "2.0";

/// The DNS Made Easy environment to talk to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    /// The isolated test environment, which doesn't affect live DNS.
    Sandbox,
}

impl Environment {
    /// Returns the managed DNS base URL of this environment for the given API version.
    pub fn endpoint(&self, version: &str) -> Result<Url, url::ParseError> {
        let host = match self {
            Environment::Production => "api.dnsmadeeasy.com",
            Environment::Sandbox => "api.sandbox.dnsmadeeasy.com",
        };
        format!("https://{host}/V{version}/dns/managed/").parse()
    }
}

/// Builder for a [Client] that handles default values.
#[derive(Default)]
pub struct ClientBuilder {
    endpoint: Option<Url>,
    api_key: Option<String>,
    api_secret: Option<String>,
    version: Option<String>,
    environment: Environment,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
}

impl ClientBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the API endpoint to the one given, overriding the environment and version.
    ///
    /// A trailing slash is added if the endpoint doesn't have one.
    pub fn endpoint(mut self, endpoint: &Url) -> Self {
        self.endpoint = Some(endpoint.clone());
        self
    }

    /// In the case that `endpoint` is the Some variant, sets the API endpoint to it.
    pub fn endpoint_if_some(mut self, endpoint: Option<&Url>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint.clone());
        }
        self
    }

    /// Sets the API key to the one given.
    pub fn api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Sets the API secret, used to sign requests, to the one given.
    pub fn api_secret(mut self, api_secret: &str) -> Self {
        self.api_secret = Some(api_secret.to_string());
        self
    }

    /// Sets the API version. Defaults to [DEFAULT_VERSION].
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Selects the environment whose endpoint is used when none is set explicitly.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets a timeout for each request made by the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables TLS certificate validation in the default transport.
    ///
    /// Only meant for testing against a sandbox. Never enable this in production.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Builds a [Client] using a blocking HTTP transport.
    ///
    /// In the case that no API endpoint is set, the endpoint of the selected
    /// environment for the selected version is used, which defaults to
    /// `https://api.dnsmadeeasy.com/V2.0/dns/managed/`.
    ///
    /// # Errors
    /// - `MissingField` if the API key or secret isn't added to the builder.
    /// - `UrlParse` if the endpoint can't be built from the version.
    /// - `Transport` if the HTTP client can't be initialised.
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        let transport = HttpTransport::with_options(self.timeout, self.accept_invalid_certs)?;
        self.build_with_transport(transport)
    }

    /// Builds a [Client] that sends its requests through `transport`.
    ///
    /// The timeout and certificate settings of the builder are not applied to
    /// a custom transport.
    pub fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<Client<T>, ClientBuilderError> {
        let version = self
            .version
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let mut endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => self.environment.endpoint(&version)?,
        };
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        let api_key = self
            .api_key
            .ok_or_else(|| ClientBuilderError::MissingField("api_key".to_string()))?;
        let api_secret = self
            .api_secret
            .ok_or_else(|| ClientBuilderError::MissingField("api_secret".to_string()))?;

        Ok(Client {
            endpoint,
            version,
            credentials: Credentials::new(&api_key, &api_secret),
            transport,
        })
    }
}

/// API client.
///
/// The client holds only immutable configuration, so it can be shared between
/// threads and used for concurrent requests. Every request is signed with a
/// fresh timestamp. Rate-limited requests are not retried; see
/// [ApiError::is_rate_limited].
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    endpoint: Url,
    version: String,
    credentials: Credentials,
    transport: T,
}

impl Client {
    /// Creates a client for the production environment with the default version.
    pub fn new(api_key: &str, api_secret: &str) -> Result<Self, ClientBuilderError> {
        Self::builder()
            .api_key(api_key)
            .api_secret(api_secret)
            .build()
    }

    /// Returns a builder for a Client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<T: Transport> Client<T> {
    /// The base URL all operations are relative to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates a [Url] from the endpoint and a relative path.
    fn build_url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.endpoint.join(path)
    }

    /// Signs and sends a request, then decodes its response.
    ///
    /// Returns `None` if the request succeeded with an empty body.
    fn send_request<R: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Option<R>, ClientError> {
        let headers = self.credentials.headers(Utc::now())?;

        log::debug!("{method} {url}");
        let resp = self.transport.send(Request {
            method: method.clone(),
            url: url.clone(),
            headers,
            body,
        })?;
        log::debug!(
            "{method} {url}: {} ({} bytes)",
            resp.status,
            resp.body.len()
        );

        if resp.status.as_u16() >= 400 {
            let err = ApiError::from_response(&resp);
            log::warn!("{method} {url} failed: {err}");
            return Err(ClientError::Api(err));
        }

        if resp.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&resp.body)?))
    }

    /// Creates several domains at once.
    ///
    /// The provider only returns the ids of the new domains, which aren't
    /// guaranteed to be in the same order as `names`.
    pub fn create_domains(&self, names: &[&str]) -> Result<Vec<u64>, ClientError> {
        let url = self.build_url("")?;
        let body = Payload::new().add("names", names.to_vec()).to_vec()?;

        Ok(self
            .send_request(Method::POST, url, Some(body))?
            .unwrap_or_default())
    }

    /// Creates a single domain and returns it as stored by the provider.
    pub fn create_domain(&self, name: &str) -> Result<Domain, ClientError> {
        let url = self.build_url("")?;
        let body = Payload::new().add("name", vec![name]).to_vec()?;

        Ok(self
            .send_request(Method::POST, url, Some(body))?
            .unwrap_or_default())
    }

    pub fn delete_domain(&self, id: u64) -> Result<(), ClientError> {
        self.delete_domains(&[id])
    }

    pub fn delete_domains(&self, ids: &[u64]) -> Result<(), ClientError> {
        let url = self.build_url("")?;
        let body = serde_json::to_vec(ids)?;

        self.send_request::<IgnoredAny>(Method::DELETE, url, Some(body))?;
        Ok(())
    }

    /// Applies the same changes to every domain in `ids`.
    pub fn update_domains(&self, ids: &[u64], update: &DomainUpdate) -> Result<(), ClientError> {
        let url = self.build_url("")?;
        let body = update.to_payload(ids).to_vec()?;

        self.send_request::<IgnoredAny>(Method::PUT, url, Some(body))?;
        Ok(())
    }

    pub fn get_domains(&self) -> Result<DomainList, ClientError> {
        let url = self.build_url("")?;

        Ok(self.send_request(Method::GET, url, None)?.unwrap_or_default())
    }

    pub fn get_domain_by_id(&self, id: u64) -> Result<Domain, ClientError> {
        let url = self.build_url(&id.to_string())?;

        Ok(self.send_request(Method::GET, url, None)?.unwrap_or_default())
    }

    pub fn get_domain_by_name(&self, name: &str) -> Result<Domain, ClientError> {
        let mut url = self.build_url("name")?;
        url.query_pairs_mut().append_pair("domainname", name);

        Ok(self.send_request(Method::GET, url, None)?.unwrap_or_default())
    }

    /// Retrieves the records of the domain with the given id.
    pub fn get_domain_records(&self, domain_id: u64) -> Result<Vec<Record>, ClientError> {
        let url = self.build_url(&format!("{domain_id}/records"))?;

        Ok(self
            .send_request::<DomainRecords>(Method::GET, url, None)?
            .unwrap_or_default()
            .records)
    }

    /// Adds a record to a domain and returns it with the id assigned by the provider.
    pub fn add_record(&self, domain_id: u64, record: &Record) -> Result<Record, ClientError> {
        let url = self.build_url(&format!("{domain_id}/records"))?;
        let body = serde_json::to_vec(record)?;

        Ok(self
            .send_request(Method::POST, url, Some(body))?
            .unwrap_or_else(|| record.clone()))
    }

    /// Replaces an existing record of a domain.
    ///
    /// # Errors
    ///
    /// Will return `MissingRecordId` if `record` has no id.
    pub fn update_record(&self, domain_id: u64, record: &Record) -> Result<Record, ClientError> {
        let record_id = record.id.ok_or(ClientError::MissingRecordId)?;
        let url = self.build_url(&format!("{domain_id}/records/{record_id}"))?;
        let body = serde_json::to_vec(record)?;

        Ok(self
            .send_request(Method::PUT, url, Some(body))?
            .unwrap_or_else(|| record.clone()))
    }

    pub fn delete_record(&self, domain_id: u64, record_id: u64) -> Result<(), ClientError> {
        let url = self.build_url(&format!("{domain_id}/records/{record_id}"))?;

        self.send_request::<IgnoredAny>(Method::DELETE, url, None)?;
        Ok(())
    }
}
