use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;

/// A candidate condition from the differential diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseMatch {
    pub name: String,
    /// 0..=100, enforced by the response validator.
    pub match_percentage: u8,
    pub description: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_symptoms: Option<Vec<String>>,
}

impl DiseaseMatch {
    pub fn band(&self) -> MatchBand {
        MatchBand::from_percentage(self.match_percentage)
    }
}

/// Validated verdict of the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningResult {
    pub risk_level: RiskLevel,
    pub triage_message: String,
    pub summary: String,
    pub potential_conditions: Vec<DiseaseMatch>,
    pub care_advice: Vec<String>,
    pub recommended_specialist: String,
}

impl ScreeningResult {
    /// First entry of the service's ranked list.
    pub fn top_condition(&self) -> Option<&DiseaseMatch> {
        self.potential_conditions.first()
    }

    pub fn tone(&self) -> RiskTone {
        RiskTone::from(self.risk_level)
    }
}

/// Banner tone for the triage header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTone {
    Emergency,
    High,
    Medium,
    Low,
}

impl From<RiskLevel> for RiskTone {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Emergency => Self::Emergency,
            RiskLevel::High => Self::High,
            RiskLevel::Medium => Self::Medium,
            RiskLevel::Low => Self::Low,
        }
    }
}

/// Colour band of a match bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    High,
    Medium,
    Low,
}

impl MatchBand {
    pub fn from_percentage(pct: u8) -> Self {
        if pct >= 80 {
            Self::High
        } else if pct >= 50 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(name: &str, pct: u8) -> DiseaseMatch {
        DiseaseMatch {
            name: name.into(),
            match_percentage: pct,
            description: String::new(),
            reasoning: String::new(),
            missing_symptoms: None,
        }
    }

    fn result_with(conditions: Vec<DiseaseMatch>) -> ScreeningResult {
        ScreeningResult {
            risk_level: RiskLevel::Medium,
            triage_message: "Đi khám trong 24h".into(),
            summary: "Sốt cao".into(),
            potential_conditions: conditions,
            care_advice: vec![],
            recommended_specialist: "Truyền nhiễm".into(),
        }
    }

    #[test]
    fn top_condition_is_first_ranked_entry() {
        let result = result_with(vec![condition("Sốt xuất huyết", 60), condition("Cúm A", 85)]);
        assert_eq!(result.top_condition().unwrap().name, "Sốt xuất huyết");
    }

    #[test]
    fn top_condition_tie_keeps_first() {
        let result = result_with(vec![condition("Cúm A", 70), condition("Sởi", 70)]);
        assert_eq!(result.top_condition().unwrap().name, "Cúm A");
    }

    #[test]
    fn no_conditions_no_top() {
        assert!(result_with(vec![]).top_condition().is_none());
    }

    #[test]
    fn match_bands() {
        assert_eq!(MatchBand::from_percentage(80), MatchBand::High);
        assert_eq!(MatchBand::from_percentage(79), MatchBand::Medium);
        assert_eq!(MatchBand::from_percentage(50), MatchBand::Medium);
        assert_eq!(MatchBand::from_percentage(49), MatchBand::Low);
        assert_eq!(MatchBand::from_percentage(0), MatchBand::Low);
    }

    #[test]
    fn result_serializes_camel_case() {
        let json = serde_json::to_value(result_with(vec![condition("Cúm A", 60)])).unwrap();
        assert_eq!(json["riskLevel"], "Trung bình - Nên đi khám");
        assert_eq!(json["potentialConditions"][0]["matchPercentage"], 60);
        assert!(json["potentialConditions"][0].get("missingSymptoms").is_none());
    }
}
