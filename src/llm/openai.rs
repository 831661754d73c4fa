use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::OpenAiConfig;
use crate::error::GeneratorError;
use crate::llm::{ChatMessage, TextGenerator};

/// Client for an OpenAI-compatible `POST /chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(cfg: &OpenAiConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", cfg.base_url.trim_end_matches('/')),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
        })
    }
}

/// Pulls the first choice's text out of a completion response.
fn first_content(response: CompletionResponse) -> Result<String, GeneratorError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(GeneratorError::EmptyResponse)
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GeneratorError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
        };
        debug!("Sending {} messages to {}", messages.len(), self.endpoint);

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        first_content(res.json::<CompletionResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> CompletionResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn extracts_and_trims_first_choice() {
        let response = parse(
            r#"{"id":"x","choices":[
                {"index":0,"message":{"role":"assistant","content":"  はい \n"}},
                {"index":1,"message":{"role":"assistant","content":"いいえ"}}
            ]}"#,
        );
        assert_eq!(first_content(response).unwrap(), "はい");
    }

    #[test]
    fn blank_or_missing_content_is_empty_response() {
        let blank = parse(r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#);
        assert!(matches!(first_content(blank), Err(GeneratorError::EmptyResponse)));

        let null = parse(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#);
        assert!(matches!(first_content(null), Err(GeneratorError::EmptyResponse)));

        let none = parse(r#"{"choices":[]}"#);
        assert!(matches!(first_content(none), Err(GeneratorError::EmptyResponse)));
    }

    #[test]
    fn request_serializes_lowercase_roles() {
        let messages = vec![ChatMessage::system("persona"), ChatMessage::user("質問")];
        let request = CompletionRequest {
            model: "gpt-4",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "質問");
    }

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let cfg = OpenAiConfig {
            api_key: "k".to_string(),
            model: "gpt-4".to_string(),
            base_url: "http://localhost:9999/v1/".to_string(),
            timeout_secs: 5,
        };
        let generator = OpenAiGenerator::new(&cfg).unwrap();
        assert_eq!(generator.endpoint, "http://localhost:9999/v1/chat/completions");
    }
}
