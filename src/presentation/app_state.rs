// Application state for HTTP handlers
use crate::application::ingestion::Ingestor;
use crate::application::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Parsing happens outside the session lock; every mutation runs under it,
/// one at a time.
pub struct AppState {
    pub session: Mutex<Session>,
    pub ingestor: Arc<dyn Ingestor>,
}

impl AppState {
    pub fn new(session: Session, ingestor: Arc<dyn Ingestor>) -> Self {
        Self {
            session: Mutex::new(session),
            ingestor,
        }
    }
}
