use crate::platform::PlatformApi;
use crate::types::{App, Credential, Deployment, Domain, Instance, Secret, Service};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const BASE_URL: &str = "https://app.koyeb.com";
pub const DEFAULT_PAGE_SIZE: usize = 100;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Pages fetched per listing before it is abandoned as runaway.
pub const MAX_PAGES: usize = 1000;
const USER_AGENT: &str = concat!("koyeb-exporter/", env!("CARGO_PKG_VERSION"));

/// Connection options for [`KoyebClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    /// Records requested per page (`limit` query parameter).
    pub page_size: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// HTTP client for the Koyeb REST API.
///
/// Authenticates every request with a Bearer token. Cheap to share behind an
/// `Arc`; the underlying `reqwest::Client` pools connections.
pub struct KoyebClient {
    access_token: String,
    http_client: Client,
    base_url: String,
    page_size: usize,
}

impl KoyebClient {
    /// Create a client against the public Koyeb API.
    pub fn new(access_token: String) -> Result<Self> {
        Self::with_options(access_token, ClientOptions::default())
    }

    /// Create a client with a custom base URL (for testing with a mock server).
    pub fn with_base_url(access_token: String, base_url: String) -> Result<Self> {
        Self::with_options(
            access_token,
            ClientOptions {
                base_url,
                ..ClientOptions::default()
            },
        )
    }

    pub fn with_options(access_token: String, options: ClientOptions) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            access_token,
            http_client,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            page_size: options.page_size.max(1),
        })
    }

    /// List every record of `resource`, following pages while the API
    /// reports `has_next`.
    ///
    /// Paging also stops on a short page or once `offset` reaches the
    /// reply's `count`. A listing still unfinished after [`MAX_PAGES`]
    /// pages fails.
    ///
    /// Records live under a key named after the resource
    /// (`{"apps": [...], "has_next": true, ...}`). A failure on any page fails
    /// the whole listing.
    async fn list_all<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut offset = 0usize;

        for _ in 0..MAX_PAGES {
            let url = format!(
                "{}/v1/{}?limit={}&offset={}",
                self.base_url, resource, self.page_size, offset
            );
            let response = self
                .http_client
                .get(&url)
                .bearer_auth(&self.access_token)
                .send()
                .await
                .with_context(|| format!("Failed to send list {} request", resource))?;

            check_response_status(&response)?;
            let mut page: Value = response
                .json()
                .await
                .with_context(|| format!("Failed to parse {} response", resource))?;

            let items: Vec<T> = match page.get_mut(resource).map(Value::take) {
                None | Some(Value::Null) => Vec::new(),
                Some(items) => serde_json::from_value(items)
                    .with_context(|| format!("Failed to decode {} records", resource))?,
            };
            let has_next = page
                .get("has_next")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let count = page
                .get("count")
                .and_then(Value::as_u64)
                .map(|c| c as usize);

            let fetched = items.len();
            records.extend(items);
            debug!(resource, offset, fetched, has_next, "Fetched page");

            offset += fetched;
            let exhausted = count.is_some_and(|count| offset >= count);
            if !has_next || fetched < self.page_size || exhausted {
                return Ok(records);
            }
        }

        Err(anyhow!(
            "Koyeb API kept paging {} past {} pages",
            resource,
            MAX_PAGES
        ))
    }
}

#[async_trait]
impl PlatformApi for KoyebClient {
    async fn list_apps(&self) -> Result<Vec<App>> {
        self.list_all("apps").await
    }

    async fn list_credentials(&self) -> Result<Vec<Credential>> {
        self.list_all("credentials").await
    }

    async fn list_deployments(&self) -> Result<Vec<Deployment>> {
        self.list_all("deployments").await
    }

    async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.list_all("domains").await
    }

    async fn list_instances(&self) -> Result<Vec<Instance>> {
        self.list_all("instances").await
    }

    async fn list_secrets(&self) -> Result<Vec<Secret>> {
        self.list_all("secrets").await
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        self.list_all("services").await
    }
}

/// Check the response status and map known error codes to descriptive errors.
///
/// - 401 → auth error (token invalid or expired)
/// - 403 → token lacks access to the organization
/// - 429 → rate limited
/// - Other non-2xx → generic API error
fn check_response_status(response: &reqwest::Response) -> Result<()> {
    match response.status() {
        StatusCode::UNAUTHORIZED => Err(anyhow!("Koyeb auth error: token invalid or expired")),
        StatusCode::FORBIDDEN => Err(anyhow!("Koyeb API access forbidden")),
        StatusCode::TOO_MANY_REQUESTS => Err(anyhow!("Koyeb rate limit exceeded")),
        s if !s.is_success() => Err(anyhow!("Koyeb API error: {}", s)),
        _ => Ok(()),
    }
}
