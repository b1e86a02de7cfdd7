use reqwest::header::HeaderMap;

/// Quota window metadata sent back on every vendor response via the
/// `x-rate-limit-*` headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Total calls allowed in the current window. Advisory, used for logging.
    pub limit: i64,
    pub remaining: i64,
    /// End of the current window, epoch seconds.
    pub reset: i64,
    /// False when any header was missing or unparsable.
    pub valid: bool,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> RateLimit {
        let field = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<i64>().ok())
        };
        let limit = field("x-rate-limit-limit");
        let remaining = field("x-rate-limit-remaining");
        let reset = field("x-rate-limit-reset");
        match (limit, remaining, reset) {
            (Some(limit), Some(remaining), Some(reset)) => RateLimit {
                limit,
                remaining,
                reset,
                valid: true,
            },
            _ => RateLimit::default(),
        }
    }
}
