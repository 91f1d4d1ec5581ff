//! Symptom screening flow: intake gate, category filtering, question flow,
//! narrative compilation and the session state machine.

pub mod filter;
pub mod flow;
pub mod narrative;
pub mod profile;
pub mod session;

pub use filter::*;
pub use flow::*;
pub use narrative::*;
pub use profile::*;
pub use session::*;

use thiserror::Error;

/// Required intake field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Age,
    Location,
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Age => write!(f, "age"),
            Self::Location => write!(f, "location"),
        }
    }
}

/// Intake is incomplete. Blocks category selection until corrected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required profile fields: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<ProfileField>,
}

fn join_fields(fields: &[ProfileField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Question {0} is not part of the current flow")]
    UnknownQuestion(String),

    #[error("Option '{option}' is not offered by question {question}")]
    InvalidOption { question: String, option: String },

    #[error("Scale answer for {question} must be between 1 and 10, got '{value}'")]
    ScaleOutOfRange { question: String, value: String },
}
