use std::str::FromStr;

use serde::Deserialize;
use serde_json::error::Category;

use super::SchemaError;
use crate::models::{DiseaseMatch, RiskLevel, ScreeningResult};

/// Validate a raw analysis reply into a `ScreeningResult`.
///
/// All-or-nothing: any missing or mistyped field, unknown risk level or
/// out-of-range match percentage rejects the whole payload. Unknown fields
/// are rejected too. A reply wrapped in a ```json fence is unwrapped first.
pub fn validate_response(raw: &str) -> Result<ScreeningResult, SchemaError> {
    let json_str = unwrap_code_fence(raw);
    if json_str.is_empty() {
        return Err(SchemaError::Empty);
    }

    let parsed: RawScreeningResult = serde_json::from_str(json_str).map_err(|e| match e.classify() {
        Category::Data => SchemaError::Shape(e.to_string()),
        _ => SchemaError::Malformed(e.to_string()),
    })?;

    let risk_level = RiskLevel::from_str(&parsed.risk_level)
        .map_err(|_| SchemaError::UnknownRiskLevel(parsed.risk_level.clone()))?;

    let potential_conditions = parsed
        .potential_conditions
        .into_iter()
        .map(RawDiseaseMatch::validate)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScreeningResult {
        risk_level,
        triage_message: parsed.triage_message,
        summary: parsed.summary,
        potential_conditions,
        care_advice: parsed.care_advice,
        recommended_specialist: parsed.recommended_specialist,
    })
}

/// Strip a surrounding ```json ... ``` (or bare ```) fence, if any.
fn unwrap_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawScreeningResult {
    risk_level: String,
    triage_message: String,
    summary: String,
    potential_conditions: Vec<RawDiseaseMatch>,
    care_advice: Vec<String>,
    recommended_specialist: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawDiseaseMatch {
    name: String,
    match_percentage: f64,
    description: String,
    reasoning: String,
    #[serde(default)]
    missing_symptoms: Option<Vec<String>>,
}

impl RawDiseaseMatch {
    fn validate(self) -> Result<DiseaseMatch, SchemaError> {
        if !(0.0..=100.0).contains(&self.match_percentage) {
            return Err(SchemaError::MatchOutOfRange {
                condition: self.name,
                value: self.match_percentage,
            });
        }
        Ok(DiseaseMatch {
            name: self.name,
            match_percentage: self.match_percentage.round() as u8,
            description: self.description,
            reasoning: self.reasoning,
            missing_symptoms: self.missing_symptoms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn minimal() -> Value {
        json!({
            "riskLevel": "Trung bình - Nên đi khám",
            "triageMessage": "Đi khám đa khoa trong 24h",
            "summary": "Sốt kèm ho khan 3 ngày",
            "potentialConditions": [],
            "careAdvice": [],
            "recommendedSpecialist": "Nội tổng quát"
        })
    }

    fn full() -> Value {
        let mut payload = minimal();
        payload["riskLevel"] = json!("Cao - Khám ngay trong ngày");
        payload["potentialConditions"] = json!([
            {
                "name": "Sốt xuất huyết Dengue",
                "matchPercentage": 85,
                "description": "Bệnh do virus Dengue",
                "reasoning": "Sốt cao, đau hốc mắt",
                "missingSymptoms": ["Xuất huyết dưới da"]
            },
            {
                "name": "Cúm A",
                "matchPercentage": 62.6,
                "description": "Nhiễm virus cúm",
                "reasoning": "Sốt, đau cơ"
            }
        ]);
        payload["careAdvice"] = json!(["Uống nhiều nước", "Không dùng Aspirin"]);
        payload
    }

    #[test]
    fn accepts_minimal_payload_with_empty_conditions() {
        let result = validate_response(&minimal().to_string()).unwrap();
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(result.potential_conditions.is_empty());
        assert!(result.top_condition().is_none());
    }

    #[test]
    fn accepts_full_payload() {
        let result = validate_response(&full().to_string()).unwrap();
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.potential_conditions.len(), 2);
        assert_eq!(result.potential_conditions[0].match_percentage, 85);
        assert_eq!(
            result.potential_conditions[0].missing_symptoms.as_deref(),
            Some(&["Xuất huyết dưới da".to_string()][..])
        );
        assert_eq!(result.potential_conditions[1].match_percentage, 63);
        assert!(result.potential_conditions[1].missing_symptoms.is_none());
        assert_eq!(result.care_advice.len(), 2);
    }

    #[test]
    fn rejects_unknown_risk_level() {
        let mut payload = minimal();
        payload["riskLevel"] = json!("Unknown");
        assert_eq!(
            validate_response(&payload.to_string()).unwrap_err(),
            SchemaError::UnknownRiskLevel("Unknown".into())
        );
    }

    #[test]
    fn rejects_padded_risk_level() {
        let mut payload = minimal();
        payload["riskLevel"] = json!("  Thấp - Tự chăm sóc\n");
        assert_eq!(
            validate_response(&payload.to_string()).unwrap_err(),
            SchemaError::UnknownRiskLevel("  Thấp - Tự chăm sóc\n".into())
        );
    }

    #[test]
    fn rejects_match_percentage_above_100() {
        let mut payload = full();
        payload["potentialConditions"][1]["matchPercentage"] = json!(150);
        let err = validate_response(&payload.to_string()).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MatchOutOfRange { ref condition, value } if condition == "Cúm A" && value == 150.0
        ));
    }

    #[test]
    fn rejects_negative_match_percentage() {
        let mut payload = full();
        payload["potentialConditions"][0]["matchPercentage"] = json!(-1);
        assert!(matches!(
            validate_response(&payload.to_string()),
            Err(SchemaError::MatchOutOfRange { .. })
        ));
    }

    #[test]
    fn boundaries_are_accepted() {
        let mut payload = full();
        payload["potentialConditions"][0]["matchPercentage"] = json!(100);
        payload["potentialConditions"][1]["matchPercentage"] = json!(0);
        let result = validate_response(&payload.to_string()).unwrap();
        assert_eq!(result.potential_conditions[0].match_percentage, 100);
        assert_eq!(result.potential_conditions[1].match_percentage, 0);
    }

    #[test]
    fn rejects_missing_required_field() {
        for field in [
            "riskLevel",
            "triageMessage",
            "summary",
            "potentialConditions",
            "careAdvice",
            "recommendedSpecialist",
        ] {
            let mut payload = minimal();
            payload.as_object_mut().unwrap().remove(field);
            assert!(
                matches!(validate_response(&payload.to_string()), Err(SchemaError::Shape(_))),
                "{field}"
            );
        }
    }

    #[test]
    fn rejects_condition_missing_reasoning() {
        let mut payload = full();
        payload["potentialConditions"][1]
            .as_object_mut()
            .unwrap()
            .remove("reasoning");
        assert!(matches!(
            validate_response(&payload.to_string()),
            Err(SchemaError::Shape(_))
        ));
    }

    #[test]
    fn rejects_wrong_types_and_unknown_fields() {
        let mut payload = minimal();
        payload["careAdvice"] = json!("Uống nhiều nước");
        assert!(matches!(
            validate_response(&payload.to_string()),
            Err(SchemaError::Shape(_))
        ));

        let mut payload = minimal();
        payload["confidence"] = json!(0.9);
        assert!(matches!(
            validate_response(&payload.to_string()),
            Err(SchemaError::Shape(_))
        ));
    }

    #[test]
    fn rejects_unparseable_and_empty() {
        assert!(matches!(
            validate_response("{\"riskLevel\": "),
            Err(SchemaError::Malformed(_))
        ));
        assert!(matches!(
            validate_response("Tôi không chắc chắn."),
            Err(SchemaError::Malformed(_))
        ));
        assert_eq!(validate_response("   ").unwrap_err(), SchemaError::Empty);
    }

    #[test]
    fn unwraps_code_fenced_reply() {
        let fenced = format!("```json\n{}\n```", minimal());
        let result = validate_response(&fenced).unwrap();
        assert_eq!(result.recommended_specialist, "Nội tổng quát");

        let bare = format!("```\n{}\n```", minimal());
        assert!(validate_response(&bare).is_ok());
    }
}
