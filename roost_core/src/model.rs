use serde::{Deserialize, Serialize};

/// Per-username bookkeeping record.
///
/// `loading` is the advisory single-flight flag: it is set right before an
/// upstream fetch begins and cleared once the fetch finishes, on success and
/// failure alike. `loading` and `last_updated` are independent: a record can
/// be loading while stale posts from an earlier fetch still exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatus {
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_started: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    /// Id of the most recent post seen, used as a watermark so subsequent
    /// fetches only request newer posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_tweet_id: Option<String>,
    /// Set after the vendor confirmed the username doesn't exist; cleared by
    /// the next successful fetch. Honored only while the cache is fresh.
    pub invalid_username: bool,
}

/// Best-known remaining call budget of a company against the upstream
/// rate-limit window. Saved only from responses with valid rate-limit headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaRecord {
    pub remaining: i64,
    /// End of the vendor's rate-limit window, epoch seconds.
    pub reset_ts: i64,
}

/// A tweet reshaped for clients. Every leaf is optional because the vendor
/// payload makes no guarantees about which fields are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    pub name: Option<String>,
    pub screen_name: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: Option<String>,
    pub user: PostUser,
    pub statistics: PostStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostUser {
    pub description: Option<String>,
    pub statuses: Option<u32>,
    pub followers: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostStatistics {
    pub retweet_count: Option<u32>,
    pub like_count: Option<u32>,
}

/// Upstream access token of a company.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub token: String,
}
