//! Error and Result module

use actix_http::uri::InvalidUri;
use actix_web::{HttpResponse, ResponseError, body::BoxBody};
use derive_more::{Display, Error};

/// Errors which occur when compiling or applying the rewrite rule
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum Error {
    /// Rule pattern failed to compile at construction time
    #[display("error compiling regex {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Substitution produced a string that is not a parseable url
    #[display("error parsing new url {url:?}: {source}")]
    InvalidRewrittenUrl { url: String, source: InvalidUri },
}

impl ResponseError for Error {
    /// Returns `500 Internal Server Error`.
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(format!("error rewriting URL: {self}"))
    }
}
