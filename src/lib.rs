//! Akinator-style guessing game server.
//!
//! One in-memory [`game::GameSession`] behind an actix-web API; topics, hints
//! and yes/no answers come from a chat-completions model through
//! [`llm::TextGenerator`].

pub mod config;
pub mod error;
pub mod game;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod routes;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::AppConfig;
pub use error::{ConfigError, GeneratorError};
pub use game::GameSession;
pub use models::AppState;
