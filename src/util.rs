//! Uri utilities for the rewrite engine

use std::str::FromStr;

use actix_http::Uri;
use actix_web::HttpRequest;

use super::error::Error;

/// Reconstruct the full url of a request as observed by the proxy.
///
/// Server-side requests only carry path and query on their uri; the
/// authority travels separately through `Host` and forwarding headers.
/// The returned url re-attaches that authority in scheme-relative form
/// (`//host/path?query`) so rules can match and rewrite the host.
pub fn full_url(req: &HttpRequest) -> String {
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!("//{}{}", req.connection_info().host(), target)
}

/// Parse a rewritten url back into a [`Uri`].
///
/// A scheme-relative url is completed with the connection scheme first,
/// since [`Uri`] cannot carry an authority without one. Fails when the
/// rewritten url is not well-formed.
pub fn parse_rewritten(scheme: &str, rewritten: &str) -> Result<Uri, Error> {
    let url = match rewritten.starts_with("//") {
        true => format!("{scheme}:{rewritten}"),
        false => rewritten.to_owned(),
    };
    Uri::from_str(&url).map_err(|source| Error::InvalidRewrittenUrl {
        url: rewritten.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_relative_completed() {
        let uri = parse_rewritten("http", "//example.com/hello?a=b").unwrap();
        assert_eq!(uri.scheme_str(), Some("http"));
        assert_eq!(uri.host(), Some("example.com"));
        assert_eq!(uri.path(), "/hello");
        assert_eq!(uri.query(), Some("a=b"));
    }

    #[test]
    fn test_origin_form_kept() {
        let uri = parse_rewritten("https", "/hello").unwrap();
        assert_eq!(uri.scheme_str(), None);
        assert_eq!(uri.path(), "/hello");
    }

    #[test]
    fn test_absolute_scheme_kept() {
        let uri = parse_rewritten("http", "https://example.org/x").unwrap();
        assert_eq!(uri.scheme_str(), Some("https"));
        assert_eq!(uri.host(), Some("example.org"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = parse_rewritten("http", ":/example.com/hello").unwrap_err();
        assert!(matches!(err, Error::InvalidRewrittenUrl { url, .. } if url == ":/example.com/hello"));
    }
}
