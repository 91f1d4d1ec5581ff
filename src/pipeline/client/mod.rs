pub mod gemini;
pub mod types;

pub use gemini::*;
pub use types::*;

use thiserror::Error;

/// Transport-level failure talking to the AI service.
#[derive(Error, Debug)]
pub enum AiServiceError {
    #[error("AI service is not reachable at {0}")]
    Connection(String),

    #[error("AI service request timed out after {0}s")]
    Timeout(u64),

    #[error("AI service returned error (status {status}): {body}")]
    ServiceError { status: u16, body: String },

    #[error("AI service API key is not configured")]
    MissingApiKey,

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Unreadable service response: {0}")]
    ResponseParsing(String),

    #[error("AI service returned no content")]
    EmptyResponse,
}
