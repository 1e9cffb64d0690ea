//! Actix-Web Middleware for single-rule full-url rewrites behind a reverse proxy.
//!
//! The middleware reconstructs the complete url of every inbound request
//! (`//host/path?query` — the authority is re-attached from the request's
//! `Host` and forwarding headers), applies one configured regex substitution
//! to it, and forwards the request with the rewritten url. A request whose
//! url the rule leaves unchanged passes through untouched; a rewrite that
//! produces an unparseable url terminates the request with
//! `500 Internal Server Error` instead of forwarding it.
//!
//! # Example
//!
//! ```
//! use actix_web::App;
//! use actix_urlrewrite::UrlRewrite;
//!
//! let rewrite = UrlRewrite::new(
//!     r"//(cust-(\w+))\.example\.com/prefix/(.+)",
//!     "//$1.example.com/$2/$3",
//! )
//! .expect("failed to compile rewrite rule");
//!
//! let app = App::new().wrap(rewrite);
//! ```
//!
//! # Documentation
//!
//! Replacement templates use `$1`, `$2`, ... to reference the capture groups
//! of the pattern; references to groups that did not participate in a match
//! expand to the empty string.
mod error;
mod factory;
mod rewrite;
mod rule;
mod service;
pub mod util;

pub use error::Error;
pub use factory::{Config, UrlRewrite};
pub use rewrite::{Engine, Rewrite};
pub use rule::Rule;
pub use service::RewriteService;
