use serde::Deserialize;
use thiserror::Error;

use crate::consts::*;
use crate::rate_limit::RateLimit;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .error.message)]
    Api { error: ApiError, rate_limit: RateLimit },
    #[error("Invalid access token")]
    InvalidAccessToken,
    #[error("Cannot encode/decode JSON: {0}")]
    JSONError(#[from] serde_json::Error),
    #[error("Network Error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Cannot parse URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl Error {
    /// Rate-limit metadata attached to the failed call, if the vendor sent any.
    pub fn rate_limit(&self) -> Option<&RateLimit> {
        match self {
            Error::Api { rate_limit, .. } => Some(rate_limit),
            _ => None,
        }
    }
}

/// An error entry from the vendor's `{"errors": [...]}` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: u32,
    pub message: String,
}

/// Classification of vendor error codes, done once at the client boundary so
/// callers never inspect codes or message text themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidOrExpiredToken,
    RateLimited,
    UserNotFound,
    Other,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self.code {
            COULD_NOT_AUTHENTICATE | INVALID_OR_EXPIRED_TOKEN => ApiErrorKind::InvalidOrExpiredToken,
            RATE_LIMIT_EXCEEDED => ApiErrorKind::RateLimited,
            PAGE_DOES_NOT_EXIST | USER_NOT_FOUND => ApiErrorKind::UserNotFound,
            _ => ApiErrorKind::Other,
        }
    }
}
