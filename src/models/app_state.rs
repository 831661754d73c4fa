use std::sync::Arc;

use tokio::sync::Mutex;

use crate::game::GameSession;
use crate::llm::TextGenerator;

/// Application state shared between requests.
///
/// The server runs exactly one game at a time. Handlers hold the lock for the
/// whole operation, generator round-trip included, so overlapping requests are
/// served one after another instead of interleaving on the session.
pub struct AppState {
    pub session: Mutex<GameSession>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, max_questions: u32) -> Self {
        Self {
            session: Mutex::new(GameSession::new(generator, max_questions)),
        }
    }
}
