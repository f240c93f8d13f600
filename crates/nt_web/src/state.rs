use std::sync::Arc;

use nt_sources::RetrievalManager;

use crate::relay::Relay;

pub struct AppState {
    pub manager: Arc<RetrievalManager>,
    pub relay: Relay,
    pub trending_topics: Vec<String>,
}
