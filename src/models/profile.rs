use serde::{Deserialize, Serialize};

use super::enums::Gender;

/// Demographics captured at intake. Only built by the profile validator,
/// so `age > 0` and a non-empty `location` always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub age: u32,
    pub gender: Gender,
    pub location: String,
    pub medical_history: Vec<String>,
}
