use std::sync::Arc;

use roost_core::store::MemoryStore;
use roost_timeline::{TimelineService, TwitterUpstream};

use crate::credentials::FileCredentialProvider;

pub type Service = TimelineService<MemoryStore, TwitterUpstream, FileCredentialProvider>;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Service>,
}
