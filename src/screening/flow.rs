use serde::Serialize;

use super::FlowError;
use crate::catalog::{
    find_category, DURATION_QUESTION_ID, EPIDEMIOLOGY_QUESTIONS, GENERAL_QUESTIONS,
    PAIN_SCALE_QUESTION_ID,
};
use crate::models::{AnswerMap, AnswerValue, CategoryFlow, Question, QuestionType};
use crate::pipeline::sanitize::sanitize_free_text;

const SCALE_MIN: u8 = 1;
const SCALE_MAX: u8 = 10;

/// Full question sequence for a category: general, then category-specific,
/// then epidemiology.
pub fn compose_flow(category_id: &str) -> Result<Vec<&'static Question>, FlowError> {
    let category = find_category(category_id)
        .ok_or_else(|| FlowError::UnknownCategory(category_id.to_string()))?;
    Ok(compose_for(category))
}

fn compose_for(category: &'static CategoryFlow) -> Vec<&'static Question> {
    GENERAL_QUESTIONS
        .iter()
        .chain(category.questions)
        .chain(EPIDEMIOLOGY_QUESTIONS)
        .collect()
}

/// Derived intake fields sent alongside the narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeSummary {
    pub chief_complaint: String,
    pub duration: String,
    pub severity: u8,
}

/// The question wizard for one chosen category and its answers so far.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionFlow {
    category: &'static CategoryFlow,
    questions: Vec<&'static Question>,
    answers: AnswerMap,
}

impl QuestionFlow {
    /// Start a fresh flow with no answers.
    pub fn start(category_id: &str) -> Result<Self, FlowError> {
        let category = find_category(category_id)
            .ok_or_else(|| FlowError::UnknownCategory(category_id.to_string()))?;
        Ok(Self {
            category,
            questions: compose_for(category),
            answers: AnswerMap::new(),
        })
    }

    pub fn category(&self) -> &'static CategoryFlow {
        self.category
    }

    pub fn questions(&self) -> &[&'static Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Record an answer.
    ///
    /// Multiple-choice answers toggle `value` in the selection; every other
    /// type replaces the stored value. An emptied selection or blank text
    /// removes the entry, so the map only ever holds answered questions.
    pub fn record_answer(&mut self, question_id: &str, value: &str) -> Result<(), FlowError> {
        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .copied()
            .ok_or_else(|| FlowError::UnknownQuestion(question_id.to_string()))?;

        match question.kind {
            QuestionType::Multiple => {
                ensure_offered(question, value)?;
                self.toggle(question.id, value);
            }
            QuestionType::Single => {
                ensure_offered(question, value)?;
                self.answers
                    .insert(question.id.to_string(), AnswerValue::One(value.to_string()));
            }
            QuestionType::Scale => {
                let level = parse_scale(question, value)?;
                self.answers
                    .insert(question.id.to_string(), AnswerValue::One(level.to_string()));
            }
            QuestionType::Text => {
                let text = sanitize_free_text(value);
                if text.is_empty() {
                    self.answers.remove(question.id);
                } else {
                    self.answers
                        .insert(question.id.to_string(), AnswerValue::One(text));
                }
            }
        }
        Ok(())
    }

    fn toggle(&mut self, question_id: &str, value: &str) {
        let mut selected = match self.answers.remove(question_id) {
            Some(AnswerValue::Many(values)) => values,
            Some(AnswerValue::One(v)) => vec![v],
            None => Vec::new(),
        };

        if let Some(pos) = selected.iter().position(|v| v == value) {
            selected.remove(pos);
        } else {
            selected.push(value.to_string());
        }

        if !selected.is_empty() {
            self.answers
                .insert(question_id.to_string(), AnswerValue::Many(selected));
        }
    }

    pub fn summary(&self) -> IntakeSummary {
        let duration = match self.answers.get(DURATION_QUESTION_ID) {
            Some(answer) => answer.display(),
            None => "Unknown".to_string(),
        };
        let severity = match self.answers.get(PAIN_SCALE_QUESTION_ID) {
            Some(AnswerValue::One(v)) => v.parse().unwrap_or(0),
            _ => 0,
        };
        IntakeSummary {
            chief_complaint: self.category.label.to_string(),
            duration,
            severity,
        }
    }
}

fn ensure_offered(question: &Question, value: &str) -> Result<(), FlowError> {
    if question.offers(value) {
        Ok(())
    } else {
        Err(FlowError::InvalidOption {
            question: question.id.to_string(),
            option: value.to_string(),
        })
    }
}

fn parse_scale(question: &Question, value: &str) -> Result<u8, FlowError> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|v| (SCALE_MIN..=SCALE_MAX).contains(v))
        .ok_or_else(|| FlowError::ScaleOutOfRange {
            question: question.id.to_string(),
            value: value.to_string(),
        })
}
