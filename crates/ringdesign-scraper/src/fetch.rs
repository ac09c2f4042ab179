//! HTTP fetcher for vendor product pages.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use ringdesign_core::AppConfig;

use crate::error::ImportError;
use crate::types::FetchedPage;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const MAX_REDIRECTS: usize = 10;

/// Header set of a desktop Chrome navigation. Cheap bot walls key on the
/// absence of these.
const BROWSER_HEADERS: [(&str, &str); 10] = [
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
    ),
    ("accept-language", "en-US,en;q=0.9"),
    ("cache-control", "no-cache"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    (
        "sec-ch-ua",
        "\"Chromium\";v=\"124\", \"Google Chrome\";v=\"124\", \"Not-A.Brand\";v=\"99\"",
    ),
    ("sec-ch-ua-platform", "\"Windows\""),
];

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Hard wall-clock budget for headers and body together.
    pub timeout: Duration,
    pub user_agent: String,
}

impl FetchSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.fetch_timeout_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Fetches product pages with browser-like headers under a hard timeout.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    /// Creates a `PageFetcher` that follows redirects and sends the browser
    /// header set on every request.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Internal`] if the user agent is not a valid
    /// header value or the `reqwest::Client` cannot be constructed.
    pub fn new(settings: &FetchSettings) -> Result<Self, ImportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in BROWSER_HEADERS {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        let user_agent =
            HeaderValue::from_str(&settings.user_agent).map_err(|e| ImportError::Internal {
                reason: format!("invalid user agent: {e}"),
            })?;
        headers.insert(header::USER_AGENT, user_agent);

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ImportError::Internal {
                reason: format!("failed to build http client: {e}"),
            })?;

        Ok(Self {
            client,
            timeout: settings.timeout,
        })
    }

    /// Fetches `url` and returns the body with the final status and URL.
    ///
    /// When the timeout elapses the in-flight request future is dropped,
    /// which aborts the transfer and returns the connection to the pool.
    ///
    /// # Errors
    ///
    /// - [`ImportError::RequestTimeout`] — no complete response within the budget.
    /// - [`ImportError::AccessBlocked`] — HTTP 403.
    /// - [`ImportError::RateLimited`] — HTTP 429.
    /// - [`ImportError::FetchFailed`] — any other non-2xx status.
    /// - [`ImportError::ConnectionFailed`] — DNS or connect failure.
    /// - [`ImportError::Internal`] — anything else from the HTTP stack.
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, ImportError> {
        if let Ok(result) = tokio::time::timeout(self.timeout, self.fetch_inner(url)).await {
            result
        } else {
            tracing::warn!(url = %url, timeout_secs = self.timeout.as_secs(), "page fetch timed out");
            Err(ImportError::RequestTimeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            })
        }
    }

    async fn fetch_inner(&self, url: &Url) -> Result<FetchedPage, ImportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify_transport_error(url, &e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if status == StatusCode::FORBIDDEN {
            return Err(ImportError::AccessBlocked {
                url: url.to_string(),
            });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ImportError::RateLimited {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ImportError::FetchFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| self.classify_transport_error(url, &e))?;

        tracing::debug!(
            url = %url,
            final_url = %final_url,
            status = status.as_u16(),
            bytes = html.len(),
            "fetched product page"
        );

        Ok(FetchedPage {
            html,
            status: status.as_u16(),
            final_url,
        })
    }

    fn classify_transport_error(&self, url: &Url, error: &reqwest::Error) -> ImportError {
        if error.is_timeout() {
            return ImportError::RequestTimeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            };
        }
        if error.is_connect() {
            return ImportError::ConnectionFailed {
                url: url.to_string(),
                reason: error.to_string(),
            };
        }
        ImportError::Internal {
            reason: format!("request to {url} failed: {error}"),
        }
    }
}
