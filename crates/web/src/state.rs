use std::sync::Arc;

use importer::CandidateSource;
use storage::store::ScoreStore;

/// Shared handles every request needs. Both are constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScoreStore>,
    pub directory: Arc<dyn CandidateSource>,
}

impl AppState {
    pub fn new(store: Arc<dyn ScoreStore>, directory: Arc<dyn CandidateSource>) -> Self {
        Self { store, directory }
    }
}
