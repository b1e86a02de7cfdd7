use roost_core::model::{Post, PostStatistics, PostUser};

use twitter_api_client as client;

/// Reshape one raw tweet into the client-facing post record. Pure; missing
/// vendor fields become `None` leaves.
pub(crate) fn post_view(tweet: &client::Tweet) -> Post {
    let user = tweet.user.as_ref();
    Post {
        name: user.and_then(|u| u.name.clone()),
        screen_name: user.and_then(|u| u.screen_name.clone()),
        profile_picture: user.and_then(|u| u.profile_image_url_https.clone()),
        created_at: tweet.created_at.clone(),
        user: PostUser {
            description: user.and_then(|u| u.description.clone()),
            statuses: user.and_then(|u| u.statuses_count),
            followers: user.and_then(|u| u.followers_count),
        },
        statistics: PostStatistics {
            retweet_count: tweet.retweet_count,
            like_count: tweet.favorite_count,
        },
    }
}

pub(crate) fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub(crate) fn timestamp_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}
