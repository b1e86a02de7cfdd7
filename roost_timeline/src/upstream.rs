use async_trait::async_trait;

use roost_core::model::Credentials;
use roost_core::Error;
use twitter_api_client::{ApiErrorKind, Error as ClientError, Result, TwitterClient, UserTimeline};

/// Boundary to the vendor timeline API. The orchestrator only talks to this
/// trait, so tests inject fakes and the vendor transport stays swappable.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Fetch up to `count` posts of a user's public timeline, newer than
    /// `since_id` when given. Errors come back already classified by the
    /// vendor client, with rate-limit metadata attached where available.
    async fn user_timeline(
        &self,
        credentials: &Credentials,
        username: &str,
        count: u32,
        since_id: Option<&str>,
    ) -> Result<UserTimeline>;
}

/// Production adapter. A vendor client is built per call because every
/// company brings its own token.
pub struct TwitterUpstream;

#[async_trait]
impl UpstreamClient for TwitterUpstream {
    async fn user_timeline(
        &self,
        credentials: &Credentials,
        username: &str,
        count: u32,
        since_id: Option<&str>,
    ) -> Result<UserTimeline> {
        let client = TwitterClient::new(&credentials.token)?;
        client.user_timeline(username, count, since_id).await
    }
}

/// Map a classified vendor failure onto the service error taxonomy. Quota and
/// conflict failures deliberately drop the vendor's own message text.
pub(crate) fn classify(error: ClientError, username: &str) -> Error {
    match &error {
        ClientError::Api { error: api, .. } => match api.kind() {
            ApiErrorKind::InvalidOrExpiredToken => Error::InvalidOrExpiredToken(api.message.clone()),
            ApiErrorKind::RateLimited => Error::QuotaExceeded,
            ApiErrorKind::UserNotFound => Error::UsernameNotFound(username.to_string()),
            ApiErrorKind::Other => Error::Upstream(api.message.clone()),
        },
        other => Error::Upstream(other.to_string()),
    }
}
