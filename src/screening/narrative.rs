use std::fmt::Write;

use crate::models::{AnswerMap, PatientProfile, Question};

const NO_HISTORY: &str = "Không";

/// Render the clinical narrative sent to the analysis service.
///
/// Pure: the same inputs always produce the same bytes. One line per answered
/// question, in flow order; unanswered questions produce nothing. Callers
/// compile fresh from the current answers instead of keeping a copy.
pub fn compile_narrative(
    profile: &PatientProfile,
    category_label: &str,
    flow: &[&Question],
    answers: &AnswerMap,
) -> String {
    let history = if profile.medical_history.is_empty() {
        NO_HISTORY.to_string()
    } else {
        profile.medical_history.join(", ")
    };

    let mut narrative = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        narrative,
        "BỆNH NHÂN: {}, {} tuổi. Khu vực: {}.",
        profile.gender, profile.age, profile.location
    );
    let _ = writeln!(narrative, "TIỀN SỬ: {history}.");
    let _ = writeln!(narrative, "NHÓM BỆNH: {category_label}.");

    for question in flow {
        if let Some(answer) = answers.get(question.id) {
            let _ = writeln!(narrative, "- {}: {}", question.text, answer.display());
        }
    }

    narrative
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerValue, Gender};
    use crate::screening::QuestionFlow;

    fn profile() -> PatientProfile {
        PatientProfile {
            age: 30,
            gender: Gender::Female,
            location: "HCM".into(),
            medical_history: vec![],
        }
    }

    #[test]
    fn header_lines() {
        let flow = QuestionFlow::start("respiratory").unwrap();
        let text = compile_narrative(&profile(), "Nhóm Hô hấp", flow.questions(), flow.answers());
        assert_eq!(
            text,
            "BỆNH NHÂN: Nữ, 30 tuổi. Khu vực: HCM.\nTIỀN SỬ: Không.\nNHÓM BỆNH: Nhóm Hô hấp.\n"
        );
    }

    #[test]
    fn history_is_comma_joined() {
        let mut p = profile();
        p.medical_history = vec!["Tiểu đường".into(), "Hen suyễn".into()];
        let text = compile_narrative(&p, "Nhóm Hô hấp", &[], &AnswerMap::new());
        assert!(text.contains("TIỀN SỬ: Tiểu đường, Hen suyễn.\n"));
    }

    #[test]
    fn answered_questions_in_flow_order() {
        let mut flow = QuestionFlow::start("respiratory").unwrap();
        // answer out of order
        flow.record_answer("epi_risk", "Không rõ").unwrap();
        flow.record_answer("resp_symptom", "Ho khan").unwrap();
        flow.record_answer("resp_symptom", "Khó thở").unwrap();
        flow.record_answer("fever_status", "Không sốt").unwrap();

        let text = compile_narrative(&profile(), "Nhóm Hô hấp", flow.questions(), flow.answers());
        let lines: Vec<_> = text.lines().skip(3).collect();
        assert_eq!(
            lines,
            vec![
                "- Tình trạng sốt?: Không sốt",
                "- Triệu chứng hô hấp chính?: Ho khan, Khó thở",
                "- Yếu tố nguy cơ & Dịch tễ:: Không rõ",
            ]
        );
    }

    #[test]
    fn unanswered_questions_produce_no_line() {
        let flow = QuestionFlow::start("cardiovascular").unwrap();
        let text = compile_narrative(&profile(), "Nhóm Tim mạch", flow.questions(), flow.answers());
        assert!(!text.contains("- "));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn deterministic() {
        let mut flow = QuestionFlow::start("hematology").unwrap();
        flow.record_answer("hema_bleed", "Xuất huyết dưới da").unwrap();
        flow.record_answer("pain_level", "4").unwrap();
        let a = compile_narrative(&profile(), "Nhóm Huyết học – Miễn dịch", flow.questions(), flow.answers());
        let b = compile_narrative(&profile(), "Nhóm Huyết học – Miễn dịch", flow.questions(), flow.answers());
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn answers_outside_flow_are_ignored() {
        let flow = QuestionFlow::start("respiratory").unwrap();
        let mut answers = AnswerMap::new();
        answers.insert("gu_urine".into(), AnswerValue::Many(vec!["Bí tiểu".into()]));
        let text = compile_narrative(&profile(), "Nhóm Hô hấp", flow.questions(), &answers);
        assert!(!text.contains("Bí tiểu"));
    }
}
