use std::env;

const SECONDS: i64 = 1000;
const MINUTES: i64 = 60 * SECONDS;
const HOURS: i64 = 60 * MINUTES;

/// Service tunables. Defaults match the production deployment; any field can
/// be overridden through a `ROOST_*` environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of posts returned when the request doesn't specify a count.
    pub default_count: usize,
    /// Maximum number of formatted posts retained per username.
    pub max_cached_posts: usize,
    /// How long a cached timeline stays fresh.
    pub cache_expiration_millis: i64,
    /// After this long, a loading flag left behind by another request is
    /// considered abandoned and overwritten.
    pub loading_timeout_millis: i64,
    /// Client is asked to retry after this time to see if the loading flag
    /// has been cleared.
    pub retry_load_seconds: u64,
    /// Warn severely when remaining quota drops below this fraction of total.
    pub quota_severe_pct: f64,
    /// Warn when remaining quota drops below this fraction of total.
    pub quota_normal_pct: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_count: 25,
            max_cached_posts: 100,
            cache_expiration_millis: 4 * HOURS,
            loading_timeout_millis: 2 * MINUTES,
            retry_load_seconds: 30,
            quota_severe_pct: 0.2,
            quota_normal_pct: 0.5,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Some(value) = env_var("ROOST_DEFAULT_COUNT") {
            config.default_count = value;
        }
        if let Some(value) = env_var("ROOST_MAX_CACHED_POSTS") {
            config.max_cached_posts = value;
        }
        if let Some(value) = env_var("ROOST_CACHE_EXPIRATION_MILLIS") {
            config.cache_expiration_millis = value;
        }
        if let Some(value) = env_var("ROOST_LOADING_TIMEOUT_MILLIS") {
            config.loading_timeout_millis = value;
        }
        if let Some(value) = env_var("ROOST_RETRY_LOAD_SECONDS") {
            config.retry_load_seconds = value;
        }
        if let Some(value) = env_var("ROOST_QUOTA_SEVERE_PCT") {
            config.quota_severe_pct = value;
        }
        if let Some(value) = env_var("ROOST_QUOTA_NORMAL_PCT") {
            config.quota_normal_pct = value;
        }
        config
    }
}

fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring unparsable value for {}: {}", name, value);
            None
        }
    }
}
