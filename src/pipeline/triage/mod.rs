//! Structured analysis contract: instruction prompt, output schema and
//! all-or-nothing response validation.

pub mod prompt;
pub mod validation;

pub use prompt::*;
pub use validation::*;

use thiserror::Error;

use super::client::AiServiceError;

/// Service reply does not match the screening result shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Analysis response is empty")]
    Empty,

    #[error("Analysis response is not valid JSON: {0}")]
    Malformed(String),

    #[error("Analysis response does not match the schema: {0}")]
    Shape(String),

    #[error("Unknown risk level: {0}")]
    UnknownRiskLevel(String),

    #[error("Match percentage {value} for '{condition}' is outside 0-100")]
    MatchOutOfRange { condition: String, value: f64 },
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Transport(#[from] AiServiceError),
}

impl AnalysisError {
    /// Single message shown for any analysis failure.
    pub fn user_message(&self) -> &'static str {
        "Phân tích thất bại. Vui lòng kiểm tra kết nối mạng hoặc API key và thử lại."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_and_transport_share_user_message() {
        let schema = AnalysisError::from(SchemaError::Empty);
        let transport = AnalysisError::from(AiServiceError::MissingApiKey);
        assert_eq!(schema.user_message(), transport.user_message());
    }

    #[test]
    fn error_display_is_transparent() {
        let err = AnalysisError::from(SchemaError::UnknownRiskLevel("Unknown".into()));
        assert_eq!(err.to_string(), "Unknown risk level: Unknown");
    }
}
