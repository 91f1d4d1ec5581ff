use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::{AiService, AnalysisRequest, ChatRequest};
use super::AiServiceError;
use crate::config::AiConfig;
use crate::models::ChatRole;

/// Gemini `generateContent` client over HTTPS.
pub struct GeminiClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AiServiceError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Client configured from `HEALTHGUARD_*` environment variables.
    pub fn from_env() -> Result<Self, AiServiceError> {
        Self::new(&AiConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn post(&self, body: &GenerateContentRequest<'_>) -> Result<String, AiServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AiServiceError::MissingApiKey)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiServiceError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiServiceError::ResponseParsing(e.to_string()))?;

        Ok(parsed.text())
    }

    fn map_send_error(&self, e: reqwest::Error) -> AiServiceError {
        if e.is_connect() {
            AiServiceError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            AiServiceError::Timeout(self.timeout_secs)
        } else {
            AiServiceError::HttpClient(e.to_string())
        }
    }
}

#[async_trait]
impl AiService for GeminiClient {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, AiServiceError> {
        let body = analysis_body(request);
        let text = self.post(&body).await?;
        if text.trim().is_empty() {
            return Err(AiServiceError::EmptyResponse);
        }
        tracing::debug!(model = %self.model, response_len = text.len(), "Analysis response received");
        Ok(text)
    }

    async fn converse(&self, request: &ChatRequest) -> Result<String, AiServiceError> {
        let body = chat_body(request);
        let text = self.post(&body).await?;
        tracing::debug!(model = %self.model, response_len = text.len(), "Chat response received");
        Ok(text)
    }
}

// ═══════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn new(role: Option<&'static str>, text: &'a str) -> Self {
        Self {
            role,
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn wire_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    }
}

fn analysis_body(request: &AnalysisRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content::new(Some("user"), &request.prompt)],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json",
            response_schema: &request.schema,
            temperature: request.temperature,
        }),
    }
}

fn chat_body(request: &ChatRequest) -> GenerateContentRequest<'_> {
    let mut contents: Vec<Content<'_>> = request
        .history
        .iter()
        .map(|entry| Content::new(Some(wire_role(entry.role)), &entry.text))
        .collect();
    contents.push(Content::new(Some("user"), &request.message));

    GenerateContentRequest {
        contents,
        system_instruction: Some(Content::new(None, &request.system_instruction)),
        generation_config: None,
    }
}
