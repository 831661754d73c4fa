pub mod category;
pub mod prompts;
pub mod session;
pub mod similarity;
pub mod texts;

// Re-export important types
pub use category::Category;
pub use session::{GameSession, SessionSnapshot};
