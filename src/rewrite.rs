//! Full-url rewrite engine

use actix_http::Uri;
use actix_web::HttpRequest;

use crate::UrlRewrite;

use super::error::Error;
use super::rule::Rule;
use super::util;

/// Outcome of evaluating a request against the rewrite rule.
#[derive(Debug)]
pub enum Rewrite {
    /// Substitution left the full url untouched; the request is
    /// forwarded as-is.
    Unchanged,
    /// Substitution produced a new, validated uri for the request.
    Uri(Uri),
}

/// Single-rule rewrite engine applied to the full request url.
///
/// The engine holds no mutable state after construction and may be
/// shared across any number of concurrent request handlers.
#[derive(Clone, Debug)]
pub struct Engine {
    rule: Rule,
}

impl Engine {
    /// Creates a new [`Engine`] from a regex pattern and replacement
    /// template.
    ///
    /// Fails when the pattern does not compile. A broken rule is
    /// surfaced here rather than deferred to request handling.
    pub fn new(regex: &str, replacement: &str) -> Result<Self, Error> {
        Ok(Self {
            rule: Rule::compile(regex, replacement)?,
        })
    }

    /// Evaluates the given [`HttpRequest`] against the rule and returns
    /// a [`Rewrite`] outcome.
    ///
    /// The request itself is never modified here; committing the new
    /// uri is left to the caller once the whole rewrite has succeeded.
    pub fn rewrite(&self, req: &HttpRequest) -> Result<Rewrite, Error> {
        let original = util::full_url(req);
        let rewritten = self.rule.replace_all(&original);
        if rewritten == original {
            return Ok(Rewrite::Unchanged);
        }
        let uri = util::parse_rewritten(req.connection_info().scheme(), &rewritten)?;
        Ok(Rewrite::Uri(uri))
    }

    /// Converts the engine instance into Actix-Web middleware.
    ///
    /// # Examples
    ///
    /// ```
    /// use actix_web::App;
    /// use actix_urlrewrite::Engine;
    ///
    /// let engine = Engine::new("/old/(.*)", "/new/$1").expect("failed to compile rule");
    ///
    /// let app = App::new().wrap(engine.middleware());
    /// ```
    #[inline]
    pub fn middleware(self) -> UrlRewrite {
        self.into()
    }
}
