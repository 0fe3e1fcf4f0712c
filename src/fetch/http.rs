// src/fetch/http.rs
// =============================================================================
// This module does all of the HTTP work for the crawler.
//
// Two kinds of downloads:
// - pages: fetched as text, then handed to the HTML parser
// - images: fetched as raw bytes, then handed to the dimension probe
//
// Any non-2xx status is treated as a failure, same as a network error.
// There are no retries: a failed url stays failed for the rest of the run.
//
// Rust concepts:
// - async/await: fetches are the only places the crawler waits
// - Result<T, E>: every fetch reports a CrawlError carrying the url
// =============================================================================

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, CrawlError};

/// Thin wrapper around a reqwest client that knows how to turn
/// failures into CrawlErrors.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds the client. `timeout` applies to each whole request;
    /// None means wait as long as the server takes.
    pub fn new(timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Client::builder().user_agent(
            user_agent
                .map(str::to_string)
                .unwrap_or_else(|| format!("button-spider/{}", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetches a page and returns its body as text
    pub async fn fetch_page(&self, url: &Url) -> Result<String, CrawlError> {
        let response = self.get(url).await?;

        // A page that declares itself as something other than HTML
        // (an image, a zip, JSON...) is not worth parsing
        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !is_html_content_type(content_type) {
                return Err(CrawlError::Parse {
                    url: url.to_string(),
                    reason: format!("content type is {}", content_type),
                });
            }
        }

        response.text().await.map_err(|source| CrawlError::Fetch {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches an image (or anything else) as raw bytes
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, CrawlError> {
        let response = self.get(url).await?;

        let bytes = response.bytes().await.map_err(|source| CrawlError::Fetch {
            url: url.to_string(),
            source,
        })?;

        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &Url) -> Result<Response, CrawlError> {
        debug!(%url, "fetching");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CrawlError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }
}

// Lenient on purpose: servers often send "text/html; charset=utf-8",
// plain text or XHTML for ordinary pages.
fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.is_empty() || mime.starts_with("text/") || mime.ends_with("+xml") || mime.ends_with("/html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("application/xhtml+xml"));
        assert!(is_html_content_type(""));
        assert!(!is_html_content_type("image/png"));
        assert!(!is_html_content_type("application/octet-stream"));
    }

    #[tokio::test]
    async fn test_fetch_page_ok() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/index.html");
                then.status(200)
                    .header("content-type", "text/html")
                    .body("<p>hello</p>");
            })
            .await;

        let fetcher = Fetcher::new(None, None).unwrap();
        let url = Url::parse(&server.url("/index.html")).unwrap();
        let body = fetcher.fetch_page(&url).await.unwrap();

        assert_eq!(body, "<p>hello</p>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_not_found_is_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        let fetcher = Fetcher::new(None, None).unwrap();
        let url = Url::parse(&server.url("/missing")).unwrap();
        let err = fetcher.fetch_page(&url).await.unwrap_err();

        assert!(matches!(err, CrawlError::Status { .. }));
        assert_eq!(err.url(), url.as_str());
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_image_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/logo.png");
                then.status(200)
                    .header("content-type", "image/png")
                    .body("not really a png");
            })
            .await;

        let fetcher = Fetcher::new(None, None).unwrap();
        let url = Url::parse(&server.url("/logo.png")).unwrap();
        let err = fetcher.fetch_page(&url).await.unwrap_err();

        assert!(matches!(err, CrawlError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_slow_response_hits_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200)
                    .body("<p>late</p>")
                    .delay(Duration::from_secs(2));
            })
            .await;

        let fetcher = Fetcher::new(Some(Duration::from_millis(200)), None).unwrap();
        let url = Url::parse(&server.url("/slow")).unwrap();
        let err = fetcher.fetch_page(&url).await.unwrap_err();

        assert!(matches!(err, CrawlError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_user_agent_is_sent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/ua").header("user-agent", "buttonbot/1.0");
                then.status(200).body("ok");
            })
            .await;

        let fetcher = Fetcher::new(None, Some("buttonbot/1.0")).unwrap();
        let url = Url::parse(&server.url("/ua")).unwrap();
        fetcher.fetch_page(&url).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_bytes_keeps_raw_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/raw");
                then.status(200).body(vec![0u8, 159, 146, 150]);
            })
            .await;

        let fetcher = Fetcher::new(Some(Duration::from_secs(5)), Some("test-agent")).unwrap();
        let url = Url::parse(&server.url("/raw")).unwrap();
        let bytes = fetcher.fetch_bytes(&url).await.unwrap();

        assert_eq!(bytes, vec![0u8, 159, 146, 150]);
    }
}
