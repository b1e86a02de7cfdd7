use async_trait::async_trait;
use tokio::sync::RwLock;

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Post, QuotaRecord, UserStatus};

/// Adapter over the shared key-value backing store.
///
/// All operations suspend without blocking other requests. Callers pass
/// usernames already lowercased; the store does no normalization of its own.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn status(&self, username: &str) -> Result<Option<UserStatus>>;
    async fn save_status(&self, username: &str, status: &UserStatus) -> Result<()>;
    /// Read up to `count` cached posts, most-recent-first.
    async fn cached_posts(&self, username: &str, count: usize) -> Result<Vec<Post>>;
    /// Overwrite the cached timeline. An empty slice is a no-op; stored
    /// timelines are trimmed to the retention cap.
    async fn save_posts(&self, username: &str, posts: &[Post]) -> Result<()>;
    async fn quota(&self, company_id: &str) -> Result<Option<QuotaRecord>>;
    async fn save_quota(&self, company_id: &str, quota: &QuotaRecord) -> Result<()>;
}

/// In-process store used by the server and tests. A networked key-value
/// adapter implements the same trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    max_posts: usize,
    statuses: RwLock<HashMap<String, UserStatus>>,
    timelines: RwLock<HashMap<String, Vec<Post>>>,
    quotas: RwLock<HashMap<String, QuotaRecord>>,
}

impl MemoryStore {
    pub fn new(max_posts: usize) -> Self {
        MemoryStore {
            max_posts,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn status(&self, username: &str) -> Result<Option<UserStatus>> {
        Ok(self.statuses.read().await.get(username).cloned())
    }

    async fn save_status(&self, username: &str, status: &UserStatus) -> Result<()> {
        self.statuses.write().await.insert(username.to_string(), status.clone());
        Ok(())
    }

    async fn cached_posts(&self, username: &str, count: usize) -> Result<Vec<Post>> {
        let timelines = self.timelines.read().await;
        let posts = timelines
            .get(username)
            .map(|posts| posts.iter().take(count).cloned().collect())
            .unwrap_or_default();
        Ok(posts)
    }

    async fn save_posts(&self, username: &str, posts: &[Post]) -> Result<()> {
        if posts.is_empty() {
            return Ok(());
        }
        let mut timeline = posts.to_vec();
        timeline.truncate(self.max_posts);
        self.timelines.write().await.insert(username.to_string(), timeline);
        Ok(())
    }

    async fn quota(&self, company_id: &str) -> Result<Option<QuotaRecord>> {
        Ok(self.quotas.read().await.get(company_id).copied())
    }

    async fn save_quota(&self, company_id: &str, quota: &QuotaRecord) -> Result<()> {
        self.quotas.write().await.insert(company_id.to_string(), *quota);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn post(name: &str) -> Post {
        Post {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn status_roundtrip() {
        let store = MemoryStore::new(100);
        assert_eq!(store.status("risevision").await.unwrap(), None);

        let status = UserStatus {
            loading: true,
            loading_started: Some(1000),
            ..Default::default()
        };
        store.save_status("risevision", &status).await.unwrap();
        assert_eq!(store.status("risevision").await.unwrap(), Some(status));
    }

    #[tokio::test]
    async fn posts_are_trimmed_to_cap() {
        let store = MemoryStore::new(3);
        let posts: Vec<Post> = (0..5).map(|i| post(&i.to_string())).collect();
        store.save_posts("risevision", &posts).await.unwrap();

        let cached = store.cached_posts("risevision", 10).await.unwrap();
        assert_eq!(cached, posts[..3].to_vec());
    }

    #[tokio::test]
    async fn posts_read_is_capped_to_count() {
        let store = MemoryStore::new(100);
        let posts: Vec<Post> = (0..5).map(|i| post(&i.to_string())).collect();
        store.save_posts("risevision", &posts).await.unwrap();

        let cached = store.cached_posts("risevision", 2).await.unwrap();
        assert_eq!(cached, posts[..2].to_vec());
    }

    #[tokio::test]
    async fn empty_save_keeps_previous_timeline() {
        let store = MemoryStore::new(100);
        let posts = vec![post("a")];
        store.save_posts("risevision", &posts).await.unwrap();
        store.save_posts("risevision", &[]).await.unwrap();

        let cached = store.cached_posts("risevision", 10).await.unwrap();
        assert_eq!(cached, posts);
    }

    #[tokio::test]
    async fn quota_roundtrip() {
        let store = MemoryStore::new(100);
        assert_eq!(store.quota("test").await.unwrap(), None);

        let quota = QuotaRecord {
            remaining: 10,
            reset_ts: 1234,
        };
        store.save_quota("test", &quota).await.unwrap();
        assert_eq!(store.quota("test").await.unwrap(), Some(quota));
    }
}
