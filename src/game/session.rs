use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::error::GeneratorError;
use crate::game::similarity::{is_match, percent, similarity};
use crate::game::{prompts, texts, Category};
use crate::llm::{ChatMessage, TextGenerator};

/// State of one guessing game.
///
/// A session is either idle or running exactly one game. Every operation
/// returns the text to show the player; generator failures are logged and
/// replaced by fixed messages, and never leave the session half-updated.
pub struct GameSession {
    generator: Arc<dyn TextGenerator>,
    history: Vec<ChatMessage>,
    question_count: u32,
    max_questions: u32,
    topic: String,
    category: Option<Category>,
    active: bool,
    game_id: Option<Uuid>,
}

/// Public view of a session. Never includes the topic.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub game_id: Option<Uuid>,
    pub active: bool,
    pub category: Option<Category>,
    pub category_label: Option<&'static str>,
    pub question_count: u32,
    pub max_questions: u32,
    pub history_len: usize,
}

impl GameSession {
    pub fn new(generator: Arc<dyn TextGenerator>, max_questions: u32) -> Self {
        Self {
            generator,
            history: Vec::new(),
            question_count: 0,
            max_questions,
            topic: String::new(),
            category: None,
            active: false,
            game_id: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// The secret answer, while a game is running.
    pub fn topic(&self) -> Option<&str> {
        self.active.then_some(self.topic.as_str())
    }

    /// Questions asked in the current game. Informational only; the limit is not enforced.
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game_id: self.game_id,
            active: self.active,
            category: self.category,
            category_label: self.category.map(Category::label),
            question_count: self.question_count,
            max_questions: self.max_questions,
            history_len: self.history.len(),
        }
    }

    /// Starts a new game unless one is already running.
    pub async fn start(&mut self) -> String {
        if self.active {
            warn!("Game {:?} already active, ignoring start", self.game_id);
            return texts::ALREADY_ACTIVE.to_string();
        }

        let category = Category::random(&mut rand::rng());
        info!("Starting game with category: {}", category);

        let topic = match self.generate_topic(category).await {
            Ok(topic) => topic,
            Err(e) => {
                error!("Error generating topic: {}", e);
                return texts::INIT_FAILED.to_string();
            }
        };

        let game_id = Uuid::new_v4();
        debug!("Game {} topic: {}", game_id, topic);

        let announcement = texts::announcement(category);
        self.game_id = Some(game_id);
        self.category = Some(category);
        self.topic = topic;
        self.question_count = 0;
        self.history = vec![ChatMessage::assistant(announcement.clone())];
        self.active = true;

        info!("Game {} started", game_id);
        announcement
    }

    /// Answers a yes/no question about the topic.
    pub async fn answer_question(&mut self, message: &str) -> String {
        if !self.active {
            return texts::GAME_OVER.to_string();
        }

        // The question stays on record even if no usable answer comes back.
        self.history.push(ChatMessage::user(message));
        self.question_count += 1;
        if self.question_count > self.max_questions {
            debug!(
                "Game {:?} past advisory question limit ({}/{})",
                self.game_id, self.question_count, self.max_questions
            );
        }

        let reply = match self.generate_reply().await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Error answering question: {}", e);
                return texts::REPLY_FAILED.to_string();
            }
        };

        if !texts::is_permitted_reply(&reply) {
            warn!("Rejected off-format reply: {}", reply);
            return texts::REPLY_MALFORMED.to_string();
        }

        self.history.push(ChatMessage::assistant(reply.clone()));
        reply
    }

    /// Produces a hint at the given difficulty. Hints are not added to the history.
    pub async fn hint(&self, level: &str) -> String {
        if !self.active {
            return texts::GAME_OVER.to_string();
        }

        match self.generate_hint(level).await {
            Ok(hint) => hint,
            Err(e) => {
                error!("Error generating {} hint: {}", level, e);
                texts::HINT_FAILED.to_string()
            }
        }
    }

    /// Scores a guess against the topic and ends the game on a match.
    pub fn guess(&mut self, answer: &str) -> String {
        if !self.active {
            return texts::GAME_OVER.to_string();
        }

        let ratio = similarity(answer, &self.topic);
        info!("Game {:?} guess scored {:.3}", self.game_id, ratio);

        if is_match(ratio) {
            self.active = false;
            info!("Game {:?} won", self.game_id);
            texts::win(answer, &self.topic, percent(ratio))
        } else {
            texts::retry(answer, percent(ratio))
        }
    }

    /// Gives up and reveals the topic.
    pub fn forfeit(&mut self) -> String {
        if !self.active {
            return texts::GAME_OVER.to_string();
        }

        self.active = false;
        info!("Game {:?} forfeited", self.game_id);
        texts::forfeit(&self.topic)
    }

    async fn generate_topic(&self, category: Category) -> Result<String, GeneratorError> {
        let messages = [
            ChatMessage::system(prompts::topic_system(category)),
            ChatMessage::user(prompts::TOPIC_REQUEST),
        ];
        let topic = self.generator.complete(&messages).await?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GeneratorError::EmptyResponse);
        }
        Ok(topic.to_string())
    }

    async fn generate_reply(&self) -> Result<String, GeneratorError> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(ChatMessage::system(prompts::reply_system(&self.topic)));
        messages.extend(self.history.iter().cloned());

        let reply = self.generator.complete(&messages).await?;
        Ok(reply.trim().to_string())
    }

    async fn generate_hint(&self, level: &str) -> Result<String, GeneratorError> {
        let messages = [
            ChatMessage::system(prompts::hint_system(&self.topic, level)),
            ChatMessage::user(prompts::HINT_REQUEST),
        ];
        let hint = self.generator.complete(&messages).await?;
        Ok(hint.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use crate::test_support::ScriptedGenerator;

    const TOPIC: &str = "Mount Fuji";

    fn session_with(generator: &Arc<ScriptedGenerator>) -> GameSession {
        GameSession::new(generator.clone(), 25)
    }

    async fn started(generator: &Arc<ScriptedGenerator>) -> GameSession {
        generator.push_ok(TOPIC);
        let mut session = session_with(generator);
        session.start().await;
        assert!(session.is_active());
        session
    }

    #[tokio::test]
    async fn start_announces_a_known_category() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_ok("  Mount Fuji\n");
        let mut session = session_with(&generator);

        let announcement = session.start().await;

        let category = session.category().unwrap();
        assert!(Category::ALL.contains(&category));
        assert!(announcement.contains(category.label()));
        assert!(!announcement.contains(TOPIC));
        assert_eq!(session.topic(), Some(TOPIC));
        assert_eq!(session.question_count(), 0);
        assert_eq!(session.history(), &[ChatMessage::assistant(announcement)]);

        let request = generator.last_request().unwrap();
        assert_eq!(request[0].role, Role::System);
        assert!(request[0].content.contains(category.label()));
    }

    #[tokio::test]
    async fn start_twice_is_a_no_op() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;
        let before = session.snapshot();

        let second = session.start().await;

        assert_eq!(second, texts::ALREADY_ACTIVE);
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.topic(), Some(TOPIC));
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn start_failure_leaves_session_idle() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_err(GeneratorError::Status {
            status: 500,
            body: "boom".to_string(),
        });
        generator.push_ok("   ");
        let mut session = session_with(&generator);

        assert_eq!(session.start().await, texts::INIT_FAILED);
        assert!(!session.is_active());
        assert!(session.history().is_empty());

        // Blank topics count as failures too.
        assert_eq!(session.start().await, texts::INIT_FAILED);
        assert!(!session.is_active());
        assert_eq!(session.snapshot().game_id, None);
    }

    #[tokio::test]
    async fn accepted_reply_is_recorded() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;
        generator.push_ok("はい");

        assert_eq!(session.answer_question("生き物ですか？").await, "はい");
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history()[1], ChatMessage::user("生き物ですか？"));
        assert_eq!(session.history()[2], ChatMessage::assistant("はい"));
        assert_eq!(session.question_count(), 1);

        // Framing first, then the full history in order.
        let request = generator.last_request().unwrap();
        assert_eq!(request.len(), 3);
        assert_eq!(request[0].role, Role::System);
        assert!(request[0].content.contains(TOPIC));
        assert_eq!(&request[1..], &session.history()[..2]);
    }

    #[tokio::test]
    async fn malformed_reply_is_not_recorded() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;
        generator.push_ok("It is Mount Fuji.");

        assert_eq!(session.answer_question("山ですか？").await, texts::REPLY_MALFORMED);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].role, Role::User);
        assert!(session.is_active());
    }

    #[tokio::test]
    async fn generator_failure_keeps_the_question() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;
        generator.push_err(GeneratorError::EmptyResponse);

        assert_eq!(session.answer_question("日本にありますか？").await, texts::REPLY_FAILED);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.question_count(), 1);
        assert!(session.is_active());
    }

    #[tokio::test]
    async fn question_limit_is_not_enforced() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_ok(TOPIC);
        let mut session = GameSession::new(generator.clone(), 1);
        session.start().await;

        for _ in 0..3 {
            generator.push_ok("いいえ");
            assert_eq!(session.answer_question("動物ですか？").await, "いいえ");
        }
        assert_eq!(session.question_count(), 3);
        assert_eq!(session.max_questions(), 1);
        assert!(session.is_active());
    }

    #[tokio::test]
    async fn hint_is_not_recorded() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;
        generator.push_ok(" 日本で一番高い。 ");

        assert_eq!(session.hint("easy").await, "日本で一番高い。");
        assert_eq!(session.history().len(), 1);

        let request = generator.last_request().unwrap();
        assert!(request[0].content.contains(TOPIC));
        assert!(request[0].content.contains("easy"));

        generator.push_err(GeneratorError::EmptyResponse);
        assert_eq!(session.hint("hard").await, texts::HINT_FAILED);
        assert!(session.is_active());
        session.forfeit();
    }

    #[tokio::test]
    async fn wrong_guess_keeps_game_running() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;

        let result = session.guess("wrong");

        assert_eq!(result, texts::retry("wrong", 26));
        assert!(session.is_active());
        assert_eq!(session.guess("wrong"), result);
    }

    #[tokio::test]
    async fn close_guess_wins() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;

        let result = session.guess("MOUNT FUJI");

        assert_eq!(result, texts::win("MOUNT FUJI", TOPIC, 100));
        assert!(!session.is_active());
        assert_eq!(session.topic(), None);
    }

    #[tokio::test]
    async fn forfeit_reveals_topic() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;

        assert_eq!(session.forfeit(), texts::forfeit(TOPIC));
        assert!(!session.is_active());
    }

    #[tokio::test]
    async fn finished_game_rejects_everything_without_calling_generator() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;
        session.forfeit();
        let calls = generator.call_count();

        assert_eq!(session.answer_question("まだ？").await, texts::GAME_OVER);
        assert_eq!(session.hint("medium").await, texts::GAME_OVER);
        assert_eq!(session.guess(TOPIC), texts::GAME_OVER);
        assert_eq!(session.forfeit(), texts::GAME_OVER);
        assert_eq!(generator.call_count(), calls);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn restart_discards_previous_game() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = started(&generator).await;
        generator.push_ok("はい");
        session.answer_question("大きいですか？").await;
        let first_id = session.snapshot().game_id;
        session.forfeit();

        generator.push_ok("Tokyo Tower");
        session.start().await;

        assert!(session.is_active());
        assert_eq!(session.topic(), Some("Tokyo Tower"));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.question_count(), 0);
        assert_ne!(session.snapshot().game_id, first_id);
    }

    #[tokio::test]
    async fn full_game() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_ok(TOPIC);
        let mut session = session_with(&generator);

        let announcement = session.start().await;
        assert!(Category::ALL.iter().any(|c| announcement.contains(c.label())));

        generator.push_ok("はい");
        assert_eq!(session.answer_question("Is it alive?").await, "はい");
        let roles: Vec<Role> = session.history().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);

        let retry = session.guess("wrong");
        assert!(retry.contains("wrong"));
        assert!(session.is_active());

        let win = session.guess(TOPIC);
        assert!(win.contains(TOPIC));
        assert!(win.contains("100%"));
        assert!(!session.is_active());
    }

    #[test]
    fn snapshot_never_leaks_topic() {
        let generator = Arc::new(ScriptedGenerator::new());
        let session = session_with(&generator);
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"active\":false"));
        assert!(!json.contains("topic"));
    }
}
