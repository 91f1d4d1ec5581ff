use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stored answer. Single, scale and text questions hold one string;
/// multiple-choice questions hold the selected options in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    One(String),
    Many(Vec<String>),
}

impl AnswerValue {
    /// Render for the narrative: multi-value answers are comma-joined.
    pub fn display(&self) -> String {
        match self {
            Self::One(value) => value.clone(),
            Self::Many(values) => values.join(", "),
        }
    }
}

/// Answers keyed by question id. Unanswered questions have no entry.
pub type AnswerMap = BTreeMap<String, AnswerValue>;
