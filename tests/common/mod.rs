//! Shared fixtures for the sandbox tests.

#![allow(dead_code)]

use std::env;
use std::thread;
use std::time::Duration;

use dnsmadeeasy::{Client, ClientError, Environment};

/// Attempts made for a rate-limited call before giving up.
pub const MAX_ATTEMPTS: u32 = 6;
pub const RETRY_DELAY: Duration = Duration::from_secs(10);

/// Skips the test when any of the given environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Calls `op` until it succeeds or fails with anything other than a
/// rate-limit error, sleeping between attempts.
pub fn retry<T>(mut op: impl FnMut() -> Result<T, ClientError>) -> Result<T, ClientError> {
    let mut attempt = 1;
    loop {
        match op() {
            Err(ClientError::Api(e)) if attempt < MAX_ATTEMPTS && e.is_rate_limited() => {
                eprintln!("rate limited (attempt {attempt}/{MAX_ATTEMPTS}): {e}");
                thread::sleep(RETRY_DELAY);
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// A sandbox client plus the prefix used to name the domains a test creates.
pub struct TestContext {
    pub client: Client,
    prefix: String,
}

impl TestContext {
    /// Builds a context from `DNSME_API_KEY`, `DNSME_API_SECRET` and the
    /// optional `DNSME_DOMAIN_PREFIX`.
    pub fn sandbox() -> Result<Self, String> {
        let api_key = env::var("DNSME_API_KEY").map_err(|e| e.to_string())?;
        let api_secret = env::var("DNSME_API_SECRET").map_err(|e| e.to_string())?;
        let prefix = env::var("DNSME_DOMAIN_PREFIX").unwrap_or_else(|_| "testcases".to_string());

        let client = Client::builder()
            .api_key(&api_key)
            .api_secret(&api_secret)
            .environment(Environment::Sandbox)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self { client, prefix })
    }

    /// Returns a domain name no other test run uses.
    pub fn domain_name(&self, tag: &str) -> String {
        let uuid = uuid::Uuid::new_v4();
        format!("{}-{tag}-{}.com", self.prefix, &uuid.to_string()[..8])
    }

    /// Creates a domain that is deleted again when the returned guard is dropped.
    pub fn create_domain(&self, tag: &str) -> Result<TestDomain<'_>, ClientError> {
        let name = self.domain_name(tag);
        let domain = retry(|| self.client.create_domain(&name))?;
        let id = domain.id.unwrap_or_default();

        Ok(TestDomain {
            client: &self.client,
            id,
            name: domain.name,
        })
    }
}

/// A domain created for a single test.
pub struct TestDomain<'a> {
    client: &'a Client,
    pub id: u64,
    pub name: String,
}

impl Drop for TestDomain<'_> {
    fn drop(&mut self) {
        if let Err(e) = retry(|| self.client.delete_domain(self.id)) {
            eprintln!("failed to clean up {} ({}): {e}", self.name, self.id);
        }
    }
}
