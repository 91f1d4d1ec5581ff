use async_trait::async_trait;
use serde::Serialize;

use super::AiServiceError;
use crate::models::ChatRole;

/// One-shot structured analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    /// Instruction prompt with the clinical narrative embedded verbatim.
    pub prompt: String,
    /// Output schema the service must conform to.
    pub schema: serde_json::Value,
    pub temperature: f32,
}

/// A prior chat message as sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatHistoryEntry {
    pub role: ChatRole,
    pub text: String,
}

/// One follow-up chat exchange. The service keeps no state between calls,
/// so every request is self-contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub system_instruction: String,
    /// Windowed prior turns, oldest first.
    pub history: Vec<ChatHistoryEntry>,
    /// New user message with the context block prepended.
    pub message: String,
}

/// External AI completion service (allows mocking).
#[async_trait]
pub trait AiService: Send + Sync {
    /// Structured generation: returns the raw JSON text.
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, AiServiceError>;

    /// Conversational turn: returns the reply text.
    async fn converse(&self, request: &ChatRequest) -> Result<String, AiServiceError>;
}
