//! Gemini API client for schema-constrained generation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use cutline_engine::{ChatMessage, LlmError, LlmResult, StructuredGenerator, StructuredResponse};

/// Models tried in order until one succeeds.
const DEFAULT_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.5-pro",
];

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    client: Client,
    models: Vec<String>,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: &'a Value,
    temperature: f64,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiClient {
    /// Create a client with an explicit API key and the default model
    /// ladder.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Create a client from `GEMINI_API_KEY`.
    pub fn from_env() -> LlmResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| LlmError::request("GEMINI_API_KEY not configured"))?;
        Ok(Self::new(api_key))
    }

    /// Replace the fallback ladder.
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    async fn call_gemini_api(
        &self,
        model: &str,
        messages: &[ChatMessage],
        schema: &Value,
        temperature: f64,
    ) -> LlmResult<Value> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            model, self.api_key
        );

        let system_instruction = messages
            .iter()
            .find(|m| m.role == "system")
            .map(|m| Content {
                parts: vec![Part {
                    text: m.content.clone(),
                }],
            });
        let contents = messages
            .iter()
            .filter(|m| m.role != "system")
            .map(|m| Content {
                parts: vec![Part {
                    text: m.content.clone(),
                }],
            })
            .collect();

        let request = GeminiRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
                temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::request(format!("Gemini API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::parse(format!("Failed to parse Gemini response: {}", e)))?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or(LlmError::Empty)?;

        serde_json::from_str(strip_code_fences(text))
            .map_err(|e| LlmError::parse(format!("Structured output is not valid JSON: {}", e)))
    }
}

/// Models occasionally wrap JSON output in markdown code fences even with
/// a JSON response mime type.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[async_trait]
impl StructuredGenerator for GeminiClient {
    async fn generate_structured(
        &self,
        messages: &[ChatMessage],
        schema: &Value,
        temperature: f64,
        model: Option<&str>,
    ) -> LlmResult<StructuredResponse> {
        // An explicit override bypasses the fallback ladder.
        if let Some(model) = model {
            info!(model, "calling Gemini API (explicit model)");
            let value = self
                .call_gemini_api(model, messages, schema, temperature)
                .await?;
            return Ok(StructuredResponse {
                value,
                model: model.to_string(),
            });
        }

        let mut last_error = None;
        for model in &self.models {
            info!(model = %model, "calling Gemini API");
            match self
                .call_gemini_api(model, messages, schema, temperature)
                .await
            {
                Ok(value) => {
                    info!(model = %model, "Gemini call succeeded");
                    return Ok(StructuredResponse {
                        value,
                        model: model.clone(),
                    });
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Gemini call failed");
                    last_error = Some(e);
                }
            }
        }

        Err(LlmError::Exhausted(
            last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no models configured".to_string()),
        ))
    }
}
