use serde::{Deserialize, Serialize};

use super::{ProfileField, ValidationError};
use crate::models::{Gender, PatientProfile};

/// Intake form as typed by the user. Age is kept as raw text until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub age: String,
    pub gender: Gender,
    pub location: String,
    pub medical_history: Vec<String>,
}

impl ProfileDraft {
    /// Toggle a history item, keeping selection order.
    pub fn toggle_history(&mut self, item: &str) {
        if let Some(pos) = self.medical_history.iter().position(|h| h == item) {
            self.medical_history.remove(pos);
        } else {
            self.medical_history.push(item.to_string());
        }
    }

    /// Check the required fields and build the immutable profile.
    ///
    /// Age must parse as a positive integer and location must be non-blank.
    /// Gender always has a value and never fails validation.
    pub fn validate(&self) -> Result<PatientProfile, ValidationError> {
        let mut missing = Vec::new();

        let age = self.age.trim().parse::<u32>().ok().filter(|a| *a > 0);
        if age.is_none() {
            missing.push(ProfileField::Age);
        }

        let location = self.location.trim();
        if location.is_empty() {
            missing.push(ProfileField::Location);
        }

        match age {
            Some(age) if missing.is_empty() => Ok(PatientProfile {
                age,
                gender: self.gender,
                location: location.to_string(),
                medical_history: self.medical_history.clone(),
            }),
            _ => Err(ValidationError { missing }),
        }
    }
}
