use serde::Serialize;

use super::enums::{BodyRegion, QuestionType};

/// A statically declared interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Empty for scale and text questions.
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
}

fn no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

impl Question {
    pub fn offers(&self, option: &str) -> bool {
        self.options.contains(&option)
    }
}

/// A disease category entry in the catalog.
///
/// `questions` holds only the category-specific questions; general and
/// epidemiology questions are added when the flow is composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFlow {
    pub id: &'static str,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub body_region: BodyRegion,
    pub questions: &'static [Question],
}
