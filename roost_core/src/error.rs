use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    NoCredentials(String),
    #[error("{0}")]
    InvalidOrExpiredToken(String),
    #[error("Another request is already loading user timeline. Please retry in a few seconds.")]
    AlreadyLoading,
    #[error("Quota limit reached.")]
    QuotaExceeded,
    #[error("Username not found: '{0}'")]
    UsernameNotFound(String),
    #[error("{0}")]
    Upstream(String),
    #[error("Store error: {0}")]
    Store(String),
}
