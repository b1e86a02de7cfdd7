use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A raw tweet as returned by the user-timeline endpoint. Only the fields the
/// proxy reshapes are kept; all of them are optional because the vendor
/// payload makes no guarantees beyond `id_str`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tweet {
    pub id_str: String,
    pub created_at: Option<String>,
    pub text: Option<String>,
    pub retweet_count: Option<u32>,
    pub favorite_count: Option<u32>,
    pub user: Option<TweetUser>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TweetUser {
    pub name: Option<String>,
    pub screen_name: Option<String>,
    pub description: Option<String>,
    pub statuses_count: Option<u32>,
    pub followers_count: Option<u32>,
    pub profile_image_url_https: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub errors: Vec<ApiError>,
}
