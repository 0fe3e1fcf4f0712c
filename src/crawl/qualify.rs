// src/crawl/qualify.rs
// =============================================================================
// Decides whether one image is a keeper.
//
// Steps:
// 1. Mark the image url as visited (before the request goes out)
// 2. Download the bytes
// 3. Read width/height from the header
// 4. Keep the image only if BOTH match the target exactly
//
// A size mismatch is not an error. The bytes are dropped and the caller
// hears nothing about it. A failed download or an unreadable header IS an
// error, handed back to the scanner to report.
// =============================================================================

use tracing::debug;
use url::Url;

use super::{QualifiedImage, VisitedSet};
use crate::config::SpiderConfig;
use crate::error::CrawlError;
use crate::fetch::{dimensions, Fetcher};

pub(crate) async fn qualify(
    fetcher: &Fetcher,
    config: &SpiderConfig,
    visited: &mut VisitedSet,
    url: &Url,
) -> Result<Option<QualifiedImage>, CrawlError> {
    visited.mark(url.as_str());

    let bytes = fetcher.fetch_bytes(url).await?;
    let (width, height) = dimensions(url.as_str(), &bytes)?;

    if !config.is_target_size(width, height) {
        debug!(%url, width, height, "image size does not match");
        return Ok(None);
    }

    Ok(Some(QualifiedImage {
        url: url.to_string(),
        bytes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::gif_fixture;
    use httpmock::{Method::GET, MockServer};

    async fn serve_gif(server: &MockServer, path: &str, width: u16, height: u16) {
        let body = gif_fixture(width, height);
        server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).header("content-type", "image/gif").body(body);
            })
            .await;
    }

    #[tokio::test]
    async fn test_matching_image_is_kept() {
        let server = MockServer::start_async().await;
        serve_gif(&server, "/button.gif", 88, 31).await;

        let fetcher = Fetcher::new(None, None).unwrap();
        let config = SpiderConfig::default();
        let mut visited = VisitedSet::new();
        let url = Url::parse(&server.url("/button.gif")).unwrap();

        let image = qualify(&fetcher, &config, &mut visited, &url).await.unwrap();

        let image = image.expect("88x31 should qualify");
        assert_eq!(image.url, url.as_str());
        assert_eq!(image.bytes, gif_fixture(88, 31));
        assert!(visited.contains(url.as_str()));
    }

    #[tokio::test]
    async fn test_off_by_one_sizes_are_dropped() {
        let server = MockServer::start_async().await;
        serve_gif(&server, "/tall.gif", 88, 32).await;
        serve_gif(&server, "/narrow.gif", 87, 31).await;

        let fetcher = Fetcher::new(None, None).unwrap();
        let config = SpiderConfig::default();
        let mut visited = VisitedSet::new();

        for path in ["/tall.gif", "/narrow.gif"] {
            let url = Url::parse(&server.url(path)).unwrap();
            let image = qualify(&fetcher, &config, &mut visited, &url).await.unwrap();
            assert!(image.is_none(), "{} should not qualify", path);
        }
        assert_eq!(visited.len(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_image_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fake.gif");
                then.status(200).body("<html>404 but with status 200</html>");
            })
            .await;

        let fetcher = Fetcher::new(None, None).unwrap();
        let config = SpiderConfig::default();
        let mut visited = VisitedSet::new();
        let url = Url::parse(&server.url("/fake.gif")).unwrap();

        let err = qualify(&fetcher, &config, &mut visited, &url).await.unwrap_err();
        assert!(matches!(err, CrawlError::Decode { .. }));
        // still counts as visited, failures are not retried
        assert!(visited.contains(url.as_str()));
    }

    #[tokio::test]
    async fn test_missing_image_is_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone.gif");
                then.status(404);
            })
            .await;

        let fetcher = Fetcher::new(None, None).unwrap();
        let config = SpiderConfig::default();
        let mut visited = VisitedSet::new();
        let url = Url::parse(&server.url("/gone.gif")).unwrap();

        let err = qualify(&fetcher, &config, &mut visited, &url).await.unwrap_err();
        assert!(err.is_fetch());
    }
}
