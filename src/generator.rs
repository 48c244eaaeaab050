use crate::config::Config;
use crate::questions::{MAX_TIMER_SECS, MIN_TIMER_SECS};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("could not decode generation API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("generation API returned no text")]
    EmptyCompletion,
}

/// A single-shot text completion service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// The instruction sent for one topic.
pub fn build_prompt(topic: &str, num_questions: usize) -> String {
    format!(
        r#"You are a helpful assistant designed to output JSON.
Generate exactly {num_questions} multiple-choice questions about '{topic}'.
Each question MUST be a JSON object with the following keys:
- "questionText": A string containing the question.
- "options": An array of exactly 4 objects, each with "text" (string) and "isCorrect" (boolean).
- "explanation": A brief string explaining the correct answer.
- "timer": An integer between {MIN_TIMER_SECS} and {MAX_TIMER_SECS} (inclusive).

RULES:
1. Exactly one option must have "isCorrect" set to true.
2. Do NOT include any images or image paths.
3. Return ONLY a single valid JSON array of these objects. Do not include any other text, greetings, or markdown code fences."#
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Pulls the completion text out of a `generateContent` response body.
fn completion_text(body: &str) -> Result<String, GenerationError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyCompletion);
    }
    Ok(text)
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.generation_timeout)
            .build()?;

        Ok(GeminiClient {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.gemini_base_url, config.gemini_model
            ),
            api_key: config.gemini_api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        completion_text(&body)
    }
}

/// Asks a [`TextGenerator`] for questions on a topic.
pub struct QuestionGenerator<G> {
    generator: G,
}

impl<G: TextGenerator> QuestionGenerator<G> {
    pub fn new(generator: G) -> Self {
        QuestionGenerator { generator }
    }

    pub fn inner(&self) -> &G {
        &self.generator
    }

    /// Returns the raw completion, or `None` if the call failed for any reason.
    pub async fn generate_text_questions(&self, topic: &str, num_questions: usize) -> Option<String> {
        info!(
            "Generating {} questions for topic: '{}'...",
            num_questions, topic
        );
        let prompt = build_prompt(topic, num_questions);

        match self.generator.generate(&prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                error!(
                    "Failed to generate questions for '{}' from the generation API: {}",
                    topic, e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigArgs};
    use std::sync::Mutex;

    struct Scripted {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_owned());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(GenerationError::Api {
                    status: *status,
                    body: "quota exceeded".to_string(),
                }),
            }
        }
    }

    fn test_config(base_url: &str) -> Config {
        Config::from_args(ConfigArgs {
            mongo_uri: Some("mongodb://localhost/quizdb".to_string()),
            gemini_api_key: Some("test-key".to_string()),
            gemini_base_url: Some(base_url.to_string()),
            generation_timeout_secs: 5,
            ..ConfigArgs::default()
        })
        .unwrap()
    }

    #[test]
    fn prompt_states_the_contract() {
        let prompt = build_prompt("World Capitals Challenge", 40);
        assert!(prompt.contains("Generate exactly 40 multiple-choice questions"));
        assert!(prompt.contains("'World Capitals Challenge'"));
        assert!(prompt.contains("exactly 4 objects"));
        assert!(prompt.contains("Exactly one option"));
        assert!(prompt.contains("between 20 and 40"));
        assert!(prompt.contains("Do NOT include any images"));
        assert!(prompt.contains("single valid JSON array"));
    }

    #[test]
    fn completion_text_joins_parts_of_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "[{\"a\": "}, {"text": "1}]"}], "role": "model"},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10}
        }"#;
        assert_eq!(completion_text(body).unwrap(), r#"[{"a": 1}]"#);
    }

    #[test]
    fn completion_without_text_is_an_error() {
        let blocked = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        assert!(matches!(
            completion_text(blocked),
            Err(GenerationError::EmptyCompletion)
        ));
        assert!(matches!(
            completion_text(r#"{"promptFeedback": {}}"#),
            Err(GenerationError::EmptyCompletion)
        ));
        assert!(matches!(
            completion_text("<html>"),
            Err(GenerationError::Decode(_))
        ));
    }

    #[test]
    fn endpoint_uses_model_and_base_url() {
        let client = GeminiClient::new(&test_config("http://localhost:9999/v1beta")).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-pro-latest:generateContent"
        );
    }

    #[tokio::test]
    async fn passes_completion_through() {
        let generator = QuestionGenerator::new(Scripted {
            reply: Ok("[]".to_string()),
            prompts: Mutex::new(Vec::new()),
        });
        let text = generator.generate_text_questions("Rivers", 5).await;
        assert_eq!(text.as_deref(), Some("[]"));

        let prompts = generator.inner().prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("'Rivers'"));
    }

    #[tokio::test]
    async fn api_failure_becomes_none() {
        let generator = QuestionGenerator::new(Scripted {
            reply: Err(429),
            prompts: Mutex::new(Vec::new()),
        });
        assert_eq!(generator.generate_text_questions("Rivers", 5).await, None);
    }

    #[tokio::test]
    async fn unreachable_service_becomes_none() {
        // Nothing listens on the discard port locally.
        let client = GeminiClient::new(&test_config("http://127.0.0.1:9/v1beta")).unwrap();
        let generator = QuestionGenerator::new(client);
        assert_eq!(generator.generate_text_questions("Rivers", 5).await, None);
    }
}
