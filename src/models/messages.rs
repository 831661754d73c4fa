use serde::{Deserialize, Serialize};

pub const DEFAULT_HINT_LEVEL: &str = "medium";

/// Body of `POST /chat`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatRequest {
    pub message: String,
}

/// Body of `POST /check`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CheckRequest {
    pub answer: String,
}

/// Body of `POST /hint`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HintRequest {
    #[serde(default = "default_hint_level")]
    pub level: String,
}

impl Default for HintRequest {
    fn default() -> Self {
        Self {
            level: default_hint_level(),
        }
    }
}

fn default_hint_level() -> String {
    DEFAULT_HINT_LEVEL.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatResponse {
    pub response: String,
}

/// Response of `POST /check` and `POST /give_up`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResultResponse {
    pub result: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HintResponse {
    pub hint: String,
}
