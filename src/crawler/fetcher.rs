//! HTTP fetching
//!
//! One client serves the whole run. Every request carries the configured
//! `User-Agent` and an opaque per-run identifier header so site operators
//! can correlate our traffic.

use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// Header naming the crawler run on every request
const RUN_ID_HEADER: &str = "X-Web-Crawler-ID";

/// A fetched response, successful at the transport level.
///
/// The body is raw bytes and the status is reported as-is; deciding what to
/// do with a non-success status (or a body that fails to decode) is the
/// engine's business.
#[derive(Debug)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub final_url: Url,
    pub body: Vec<u8>,
}

/// HTTP transport for one crawl run
pub struct Fetcher {
    client: Client,
    user_agent: String,
    run_id: String,
}

impl Fetcher {
    /// Builds the client with the run's user agent string.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
            run_id: Uuid::new_v4().to_string(),
        })
    }

    /// The opaque identifier sent with every request of this run
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Performs one GET request.
    ///
    /// Errors only on transport failures (connect, timeout, body read);
    /// HTTP error statuses still yield a [`FetchedPage`].
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, reqwest::Error> {
        tracing::debug!("Fetching {url}");

        let response = self
            .client
            .get(url.clone())
            .header(header::USER_AGENT, &self.user_agent)
            .header(RUN_ID_HEADER, &self.run_id)
            .send()
            .await?;

        let status = response.status();
        let final_url = response.url().clone();
        let body = response.bytes().await?.to_vec();

        Ok(FetchedPage {
            status,
            final_url,
            body,
        })
    }
}
