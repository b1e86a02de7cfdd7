mod credentials;
mod error;
mod router;
mod state;

use axum::Router;
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use std::env;
use std::sync::Arc;

use roost_core::store::MemoryStore;
use roost_core::Config;
use roost_timeline::{TimelineService, TwitterUpstream};

use crate::credentials::FileCredentialProvider;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()
        .unwrap()
        .add_directive("hyper::proto=info".parse().unwrap())
        .add_directive("reqwest=info".parse().unwrap());
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // 2. Load configuration and credentials
    let config = Config::from_env();
    let credentials_file = env::var("CREDENTIALS_FILE").expect("CREDENTIALS_FILE must be set");
    let credentials = FileCredentialProvider::load(&credentials_file).expect("cannot load credentials file");

    // 3. Setup service, state and router
    let store = Arc::new(MemoryStore::new(config.max_cached_posts));
    let service = TimelineService::new(store, Arc::new(TwitterUpstream), Arc::new(credentials), config);
    let app_state = AppState {
        service: Arc::new(service),
    };

    let app = Router::new()
        .merge(router::timeline_router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // 4. Start server
    let addr = env::var("SERVER_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    tracing::info!("Server starting at {}", addr);
    axum::Server::bind(&addr.parse().unwrap())
        .serve(app.into_make_service())
        .await
        .unwrap();
}
