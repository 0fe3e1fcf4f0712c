// src/fetch/html.rs
// =============================================================================
// This module pulls references out of HTML pages and turns them into
// absolute URLs.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is lenient, so even broken markup gives us a document
//
// Relative references are resolved against the page's ORIGIN
// (scheme + host + port), not against the page's full path. So on
// http://h.example.org/dir/page.html both "/z" and "z" become
// http://h.example.org/z.
// =============================================================================

use scraper::{Html, Selector};
use url::{Origin, Url};

use crate::error::CrawlError;

/// Raw (unresolved) references found on one page, in document order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageRefs {
    /// `href` of every `<a>` element
    pub links: Vec<String>,
    /// `src` of every `<img>` element
    pub images: Vec<String>,
}

// Extracts link and image references from HTML content
//
// Parameters:
//   html: the page body
//
// Returns: PageRefs. Elements without the attribute, or with an empty one,
// are left out.
//
// The parsed document is dropped before this returns, which matters to the
// caller: scraper's Html is not Send and must not live across an .await.
pub fn extract_refs(html: &str) -> PageRefs {
    let document = Html::parse_document(html);

    // These selectors are constants, so parse failure is a programmer error
    let anchors = Selector::parse("a").unwrap();
    let images = Selector::parse("img").unwrap();

    PageRefs {
        links: collect_attr(&document, &anchors, "href"),
        images: collect_attr(&document, &images, "src"),
    }
}

fn collect_attr(document: &Html, selector: &Selector, attr: &str) -> Vec<String> {
    document
        .select(selector)
        .filter_map(|element| element.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the origin of `base` as a url with an empty path ("http://h:8080/")
pub fn origin_url(base: &Url) -> Result<Url, CrawlError> {
    match base.origin() {
        Origin::Tuple(scheme, host, port) => {
            // Url::parse drops the port again when it is the scheme's default
            let origin = format!("{}://{}:{}/", scheme, host, port);
            Url::parse(&origin).map_err(|e| CrawlError::MalformedUrl {
                reference: base.to_string(),
                reason: e.to_string(),
            })
        }
        Origin::Opaque(_) => Err(CrawlError::MalformedUrl {
            reference: base.to_string(),
            reason: "url has no origin to resolve against".to_string(),
        }),
    }
}

/// Resolves a possibly-relative reference against the origin of `base`.
///
/// Absolute references come back as they are (normalized by the url crate).
pub fn resolve(reference: &str, base: &Url) -> Result<Url, CrawlError> {
    let origin = origin_url(base)?;

    origin.join(reference).map_err(|e| CrawlError::MalformedUrl {
        reference: reference.to_string(),
        reason: e.to_string(),
    })
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why resolve against the origin and not the page?
//    - That is how the crawler has always treated references. A path-relative
//      "img/button.gif" on /dir/page.html is looked up at /img/button.gif.
//
// 2. What does Url::join do with an absolute reference?
//    - It ignores the base completely, so "https://other.com" stays as is.
//
// 3. What is Origin::Opaque?
//    - URLs like "data:..." or "mailto:..." have no host, so they have no
//      tuple origin. Nothing can be resolved against them.
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_and_images_in_order() {
        let html = r#"
            <a href="/one">One</a>
            <img src="b1.gif">
            <a href="https://two.example.org/">Two</a>
            <img src="/b2.gif">
        "#;
        let refs = extract_refs(html);
        assert_eq!(refs.links, vec!["/one", "https://two.example.org/"]);
        assert_eq!(refs.images, vec!["b1.gif", "/b2.gif"]);
    }

    #[test]
    fn test_skip_missing_and_empty_attributes() {
        let html = r#"<a name="top">x</a><a href="">y</a><img><img src="  ">"#;
        let refs = extract_refs(html);
        assert!(refs.links.is_empty());
        assert!(refs.images.is_empty());
    }

    #[test]
    fn test_resolve_against_origin_not_path() {
        let base = Url::parse("http://h.example.org/dir/page.html").unwrap();
        assert_eq!(resolve("/z", &base).unwrap().as_str(), "http://h.example.org/z");
        assert_eq!(resolve("z", &base).unwrap().as_str(), "http://h.example.org/z");
    }

    #[test]
    fn test_resolve_keeps_non_default_port() {
        let base = Url::parse("http://localhost:8080/a/b?q=1").unwrap();
        assert_eq!(
            resolve("c.png", &base).unwrap().as_str(),
            "http://localhost:8080/c.png"
        );
    }

    #[test]
    fn test_resolve_absolute_reference() {
        let base = Url::parse("https://example.com/page").unwrap();
        assert_eq!(
            resolve("https://other.com", &base).unwrap().as_str(),
            "https://other.com/"
        );
    }

    #[test]
    fn test_origin_drops_default_port_and_credentials() {
        let base = Url::parse("https://user:pw@example.com:443/deep/path#frag").unwrap();
        assert_eq!(origin_url(&base).unwrap().as_str(), "https://example.com/");
    }

    #[test]
    fn test_resolve_malformed_reference() {
        let base = Url::parse("https://example.com/").unwrap();
        let err = resolve("http://[::1", &base).unwrap_err();
        assert!(matches!(err, CrawlError::MalformedUrl { .. }));
    }

    #[test]
    fn test_opaque_base_has_no_origin() {
        let base = Url::parse("data:text/plain,hello").unwrap();
        assert!(origin_url(&base).is_err());
    }
}
