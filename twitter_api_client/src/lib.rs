mod consts;
mod error;
mod rate_limit;
mod response;

use reqwest::{header, Client, StatusCode, Url};

use consts::*;
use response::ApiErrorBody;

pub use error::{ApiError, ApiErrorKind, Error, Result};
pub use rate_limit::RateLimit;
pub use response::{Tweet, TweetUser};

/// One page of a user's timeline plus the quota metadata that came with it.
#[derive(Debug, Clone)]
pub struct UserTimeline {
    pub tweets: Vec<Tweet>,
    pub rate_limit: RateLimit,
}

#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: Client,
}

impl TwitterClient {
    pub fn new(token: &str) -> Result<TwitterClient> {
        let bearer =
            header::HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| Error::InvalidAccessToken)?;
        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, bearer);

        let client = Client::builder().user_agent(USER_AGENT).default_headers(headers).build()?;
        Ok(TwitterClient { client })
    }

    /// Fetch a user's public timeline, most-recent-first. When `since_id` is
    /// given, the vendor only returns posts newer than that id.
    pub async fn user_timeline(&self, screen_name: &str, count: u32, since_id: Option<&str>) -> Result<UserTimeline> {
        let mut params = vec![
            ("screen_name", screen_name.to_string()),
            ("count", count.to_string()),
        ];
        if let Some(since_id) = since_id {
            params.push(("since_id", since_id.to_string()));
        }

        let url = Url::parse_with_params(&format!("{}/statuses/user_timeline.json", REST_API), &params)?;
        let response = self.client.get(url).send().await?;

        let rate_limit = RateLimit::from_headers(response.headers());
        let status = response.status();
        let content = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                error: parse_api_error(status, &content),
                rate_limit,
            });
        }

        let tweets: Vec<Tweet> = serde_json::from_str(&content)?;
        Ok(UserTimeline { tweets, rate_limit })
    }
}

fn parse_api_error(status: StatusCode, content: &str) -> ApiError {
    if let Ok(body) = serde_json::from_str::<ApiErrorBody>(content) {
        if let Some(error) = body.errors.into_iter().next() {
            return error;
        }
    }
    // Some throttled responses carry no error body at all.
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ApiError {
            code: RATE_LIMIT_EXCEEDED,
            message: "Rate limit exceeded".to_string(),
        };
    }
    ApiError {
        code: 0,
        message: format!("Unexpected response status: {}", status),
    }
}
