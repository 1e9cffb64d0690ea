use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::Error as ActixError,
};
use serde::Deserialize;

use crate::error::Error;
use crate::rewrite::Engine;
use crate::service::{RewriteInner, RewriteService};

/// External configuration for the rewrite middleware.
///
/// Both fields arrive as plain strings from whatever loader the host
/// application uses; the pattern is only validated once
/// [`UrlRewrite::from_config`] compiles it. The pattern is matched
/// against the scheme-relative full url of each request
/// (`//host/path?query`), so host-based rewrite rules work behind a
/// reverse proxy.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub regex: String,
    #[serde(default)]
    pub replacement: String,
}

/// Full-url rewrite middleware
///
/// `UrlRewrite` must be registered with the `App::wrap()` method.
///
/// # Examples
///
/// ```
/// use actix_web::App;
/// use actix_urlrewrite::UrlRewrite;
///
/// let rewrite = UrlRewrite::new("/prefix/(.*)", "/$1")
///     .expect("failed to compile rewrite rule");
///
/// let app = App::new().wrap(rewrite);
/// ```
pub struct UrlRewrite(Rc<Engine>);

impl UrlRewrite {
    /// Creates a new `UrlRewrite` middleware instance from a regex
    /// pattern and replacement template.
    ///
    /// Fails when the pattern is not a valid regular expression, so a
    /// broken rule can never be installed into an `App`.
    pub fn new(regex: &str, replacement: &str) -> Result<Self, Error> {
        Ok(Self::from(Engine::new(regex, replacement)?))
    }

    /// Creates a new `UrlRewrite` middleware instance from an
    /// externally loaded [`Config`].
    #[inline]
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(&config.regex, &config.replacement)
    }
}

impl From<Engine> for UrlRewrite {
    #[inline]
    fn from(value: Engine) -> Self {
        Self(Rc::new(value))
    }
}

impl<S> Transform<S, ServiceRequest> for UrlRewrite
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = ActixError> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type InitError = ();
    type Transform = RewriteService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RewriteService(Rc::new(RewriteInner {
            service: Rc::new(service),
            engine: self.0.clone(),
        }))))
    }
}
