use std::sync::Arc;

use roost_core::credentials::CredentialProvider;
use roost_core::model::{Credentials, Post, UserStatus};
use roost_core::store::CacheStore;
use roost_core::{Config, Error, Result};
use twitter_api_client::{ApiErrorKind, Error as ClientError, UserTimeline};

use crate::quota::QuotaGuard;
use crate::upstream::{classify, UpstreamClient};
use crate::util::{post_view, timestamp_millis};

const SECOND_MILLIS: i64 = 1000;

/// A timeline request as received from the transport layer. `count` arrives
/// unparsed so that malformed values fail validation here, in one place.
#[derive(Debug, Clone, Default)]
pub struct TimelineRequest {
    pub company_id: String,
    pub username: String,
    pub count: Option<String>,
}

/// Response contract: formatted posts, whether they came from cache, and an
/// advisory freshness window in seconds for the Cache-Control header.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub posts: Vec<Post>,
    pub cached: bool,
    pub max_age: u64,
}

/// A validated request: company and username present, username lowercased,
/// count parsed and range-checked.
#[derive(Debug)]
struct Query {
    company_id: String,
    username: String,
    count: usize,
}

/// The timeline retrieval orchestrator.
///
/// Decides cache-hit / cache-miss / in-flight-conflict from the per-username
/// status record, coordinates the advisory single-flight loading flag, runs
/// upstream calls through the quota guard, and persists results. All
/// collaborators are injected, so tests drive it with fakes.
pub struct TimelineService<S, U, P> {
    store: Arc<S>,
    upstream: Arc<U>,
    credentials: Arc<P>,
    config: Config,
}

impl<S, U, P> TimelineService<S, U, P>
where
    S: CacheStore,
    U: UpstreamClient,
    P: CredentialProvider,
{
    pub fn new(store: Arc<S>, upstream: Arc<U>, credentials: Arc<P>, config: Config) -> Self {
        TimelineService {
            store,
            upstream,
            credentials,
            config,
        }
    }

    pub async fn get_timeline(&self, request: &TimelineRequest) -> Result<Timeline> {
        let query = self.validate(request)?;
        let credentials = self.credentials.credentials(&query.company_id).await?;
        let status = self.store.status(&query.username).await?.unwrap_or_default();

        if status.invalid_username && self.cache_is_fresh(&status) {
            return Err(Error::UsernameNotFound(query.username));
        }

        if status.loading {
            let elapsed = match status.loading_started {
                Some(started) => timestamp_millis() - started,
                // A lock without a start time is always considered stale.
                None => i64::MAX,
            };
            if elapsed <= self.config.loading_timeout_millis {
                if status.last_updated.is_some() {
                    return self.from_cache(&query, &status).await;
                }
                return Err(Error::AlreadyLoading);
            }
            // Abandoned lock: fall through to a fresh fetch and overwrite it.
        } else if self.cache_is_fresh(&status) {
            return self.from_cache(&query, &status).await;
        }

        self.fetch_remote(&query, status, &credentials).await
    }

    fn validate(&self, request: &TimelineRequest) -> Result<Query> {
        if request.company_id.is_empty() {
            return Err(Error::InvalidRequest("Company id was not provided".to_string()));
        }
        if request.username.is_empty() {
            return Err(Error::InvalidRequest("Username was not provided".to_string()));
        }
        let count = match &request.count {
            None => self.config.default_count,
            Some(raw) => {
                // Digits only: `parse` alone would also accept a leading `+`.
                if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::InvalidRequest(format!(
                        "'count' is not a valid integer value: {}",
                        raw
                    )));
                }
                let count: usize = raw
                    .parse()
                    .map_err(|_| Error::InvalidRequest(format!("'count' is not a valid integer value: {}", raw)))?;
                if count < 1 || count > self.config.max_cached_posts {
                    return Err(Error::InvalidRequest(format!("'count' is out of range: {}", count)));
                }
                count
            }
        };
        Ok(Query {
            company_id: request.company_id.clone(),
            username: request.username.to_lowercase(),
            count,
        })
    }

    fn cache_is_fresh(&self, status: &UserStatus) -> bool {
        let elapsed = timestamp_millis() - status.last_updated.unwrap_or(0);
        elapsed <= self.config.cache_expiration_millis
    }

    /// Seconds-to-expiry for the Cache-Control directive. While a fetch is in
    /// flight the client is asked to retry shortly instead.
    fn max_age(&self, status: &UserStatus) -> u64 {
        if status.loading {
            return self.config.retry_load_seconds;
        }
        let expiration = status.last_updated.unwrap_or(0) + self.config.cache_expiration_millis;
        let remaining = (expiration - timestamp_millis()).max(0);
        ((remaining + SECOND_MILLIS - 1) / SECOND_MILLIS) as u64 + 1
    }

    async fn from_cache(&self, query: &Query, status: &UserStatus) -> Result<Timeline> {
        if status.invalid_username {
            return Err(Error::UsernameNotFound(query.username.clone()));
        }
        let posts = self.store.cached_posts(&query.username, query.count).await?;
        Ok(Timeline {
            posts,
            cached: true,
            max_age: self.max_age(status),
        })
    }

    /// The single-flight section: quota pre-check, lock on, upstream call,
    /// persist, lock off. The lock writes bracket the upstream call on every
    /// exit path; a quota rejection happens before the lock is ever touched.
    async fn fetch_remote(&self, query: &Query, mut status: UserStatus, credentials: &Credentials) -> Result<Timeline> {
        let quota = QuotaGuard::new(self.store.as_ref(), &self.config);
        quota.check(&query.company_id).await?;

        status.loading = true;
        status.loading_started = Some(timestamp_millis());
        self.store.save_status(&query.username, &status).await?;

        let result = self
            .upstream
            .user_timeline(
                credentials,
                &query.username,
                self.config.max_cached_posts as u32,
                status.last_tweet_id.as_deref(),
            )
            .await;

        match result {
            Ok(timeline) => self.finish_fetch(query, status, timeline, &quota).await,
            Err(error) => self.fail_fetch(query, status, error, &quota).await,
        }
    }

    async fn finish_fetch(
        &self,
        query: &Query,
        mut status: UserStatus,
        timeline: UserTimeline,
        quota: &QuotaGuard<'_, S>,
    ) -> Result<Timeline> {
        let mut posts: Vec<Post> = timeline.tweets.iter().map(post_view).collect();

        // A failed timeline write degrades to serving without cache benefit;
        // the fetch itself still counts as an update.
        if let Err(error) = self.store.save_posts(&query.username, &posts).await {
            tracing::warn!("Cannot save posts for {}: {}", query.username, error);
        }

        if let Some(newest) = timeline.tweets.first() {
            status.last_tweet_id = Some(newest.id_str.clone());
        }
        status.last_updated = Some(timestamp_millis());
        status.invalid_username = false;
        self.store.save_status(&query.username, &status).await?;

        status.loading = false;
        status.loading_started = None;
        self.store.save_status(&query.username, &status).await?;

        quota.record(&query.company_id, Some(&timeline.rate_limit), false).await;

        if posts.len() < query.count {
            // This fetch alone cannot satisfy the request; the cache now also
            // holds whatever the fetch brought in.
            return self.from_cache(query, &status).await;
        }
        posts.truncate(query.count);
        Ok(Timeline {
            posts,
            cached: false,
            max_age: self.max_age(&status),
        })
    }

    async fn fail_fetch(
        &self,
        query: &Query,
        mut status: UserStatus,
        error: ClientError,
        quota: &QuotaGuard<'_, S>,
    ) -> Result<Timeline> {
        status.loading = false;
        status.loading_started = None;
        self.store.save_status(&query.username, &status).await?;

        let throttled = matches!(&error, ClientError::Api { error, .. } if error.kind() == ApiErrorKind::RateLimited);
        let rate_limit = error.rate_limit().copied();
        quota.record(&query.company_id, rate_limit.as_ref(), throttled).await;

        let mapped = classify(error, &query.username);
        if matches!(mapped, Error::UsernameNotFound(_)) {
            // Remember confirmed-missing usernames until the cache goes stale.
            status.invalid_username = true;
            status.last_updated = Some(timestamp_millis());
            self.store.save_status(&query.username, &status).await?;
        }
        Err(mapped)
    }
}
