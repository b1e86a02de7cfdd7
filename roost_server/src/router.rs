use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use roost_core::model::Post;
use roost_timeline::TimelineRequest;

use crate::{error::Result, state::AppState};

pub fn timeline_router() -> Router<AppState> {
    Router::new()
        .route("/timelineservice", get(service_info))
        .route("/timelines", get(get_timeline))
}

async fn service_info() -> String {
    format!("Timeline Service: {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineParams {
    company_id: Option<String>,
    username: Option<String>,
    count: Option<String>,
}

#[derive(Debug, Serialize)]
struct TimelinePayload {
    tweets: Vec<Post>,
    cached: bool,
}

async fn get_timeline(State(state): State<AppState>, Query(params): Query<TimelineParams>) -> Result<Response> {
    let request = TimelineRequest {
        company_id: params.company_id.unwrap_or_default(),
        username: params.username.unwrap_or_default(),
        count: params.count,
    };
    let timeline = state.service.get_timeline(&request).await?;

    let payload = TimelinePayload {
        tweets: timeline.posts,
        cached: timeline.cached,
    };
    let cache_control = header::HeaderValue::from_str(&format!("private, max-age={}", timeline.max_age))?;

    let mut response = Json(payload).into_response();
    response.headers_mut().insert(header::CACHE_CONTROL, cache_control);
    Ok(response)
}
