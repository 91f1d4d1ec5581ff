use std::fmt::Write;

use crate::config::CHAT_HISTORY_WINDOW;
use crate::models::{ChatTurn, PatientProfile, ScreeningResult};
use crate::pipeline::client::{ChatHistoryEntry, ChatRequest};

use super::prompt::CHAT_SYSTEM_INSTRUCTION;

const UNKNOWN_CONDITION: &str = "Chưa xác định";

/// Screening facts re-sent with every chat turn. The service keeps no state
/// between calls.
#[derive(Debug, Clone, Copy)]
pub struct ChatContext<'a> {
    pub profile: &'a PatientProfile,
    pub chief_complaint: &'a str,
    pub narrative: &'a str,
    pub result: &'a ScreeningResult,
}

/// The most recent `CHAT_HISTORY_WINDOW` turns. Older turns are dropped.
pub fn window_history(history: &[ChatTurn]) -> &[ChatTurn] {
    let start = history.len().saturating_sub(CHAT_HISTORY_WINDOW);
    &history[start..]
}

/// Condensed context block prepended to the user's message.
pub fn build_context_block(context: &ChatContext<'_>) -> String {
    let top = match context.result.top_condition() {
        Some(condition) => format!("{} ({}% khớp)", condition.name, condition.match_percentage),
        None => UNKNOWN_CONDITION.to_string(),
    };

    let mut block = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(block, "CONTEXT:");
    let _ = writeln!(
        block,
        "Bệnh nhân: {}, {} tuổi.",
        context.profile.gender, context.profile.age
    );
    let _ = writeln!(block, "Triệu chứng chính: {}.", context.chief_complaint);
    let _ = writeln!(block, "Chi tiết: {}", context.narrative.trim_end());
    let _ = writeln!(block);
    let _ = writeln!(block, "KẾT QUẢ SÀNG LỌC:");
    let _ = writeln!(block, "- Chẩn đoán hàng đầu: {top}.");
    let _ = writeln!(block, "- Mức độ: {}.", context.result.risk_level);
    let _ = write!(block, "- Lời khuyên: {}.", context.result.triage_message);
    block
}

/// Build the request for one chat exchange.
///
/// `history` is the conversation before the new user turn; only its last
/// `CHAT_HISTORY_WINDOW` turns travel with the request.
pub fn build_chat_request(
    history: &[ChatTurn],
    new_message: &str,
    context: &ChatContext<'_>,
) -> ChatRequest {
    let history = window_history(history)
        .iter()
        .map(|turn| ChatHistoryEntry {
            role: turn.role,
            text: turn.text.clone(),
        })
        .collect();

    ChatRequest {
        system_instruction: CHAT_SYSTEM_INSTRUCTION.to_string(),
        history,
        message: format!(
            "{}\n\nCâu hỏi người dùng: {new_message}",
            build_context_block(context)
        ),
    }
}

/// Append-only: returns the history with `turn` at the end.
pub fn append_turn(mut history: Vec<ChatTurn>, turn: ChatTurn) -> Vec<ChatTurn> {
    history.push(turn);
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatRole, DiseaseMatch, Gender, RiskLevel};

    fn profile() -> PatientProfile {
        PatientProfile {
            age: 27,
            gender: Gender::Female,
            location: "Đà Nẵng".into(),
            medical_history: vec![],
        }
    }

    fn condition(name: &str, pct: u8) -> DiseaseMatch {
        DiseaseMatch {
            name: name.into(),
            match_percentage: pct,
            description: String::new(),
            reasoning: String::new(),
            missing_symptoms: None,
        }
    }

    fn result(conditions: Vec<DiseaseMatch>) -> ScreeningResult {
        ScreeningResult {
            risk_level: RiskLevel::High,
            triage_message: "Đi khám trong ngày".into(),
            summary: "Sốt cao 3 ngày".into(),
            potential_conditions: conditions,
            care_advice: vec![],
            recommended_specialist: "Truyền nhiễm".into(),
        }
    }

    fn history(n: usize) -> Vec<ChatTurn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ChatTurn::assistant(format!("turn {i}"))
                } else {
                    ChatTurn::user(format!("turn {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn fifteen_turns_window_to_last_ten() {
        let turns = history(15);
        let windowed = window_history(&turns);
        assert_eq!(windowed.len(), 10);
        assert_eq!(windowed[0].text, "turn 5");
        assert_eq!(windowed[9].text, "turn 14");
    }

    #[test]
    fn short_history_is_kept_whole() {
        let turns = history(3);
        assert_eq!(window_history(&turns).len(), 3);
        assert!(window_history(&[]).is_empty());
    }

    #[test]
    fn request_carries_windowed_history_and_new_message() {
        let turns = history(15);
        let r = result(vec![condition("Sốt xuất huyết", 80)]);
        let p = profile();
        let ctx = ChatContext {
            profile: &p,
            chief_complaint: "Nhóm Hô hấp",
            narrative: "BỆNH NHÂN: Nữ, 27 tuổi.\n",
            result: &r,
        };

        let request = build_chat_request(&turns, "Tôi có cần xét nghiệm máu không?", &ctx);
        assert_eq!(request.history.len(), 10);
        assert_eq!(request.history[0].text, "turn 5");
        assert_eq!(request.history[0].role, ChatRole::User);
        assert_eq!(request.system_instruction, CHAT_SYSTEM_INSTRUCTION);
        assert!(request.message.starts_with("CONTEXT:\n"));
        assert!(request
            .message
            .ends_with("\n\nCâu hỏi người dùng: Tôi có cần xét nghiệm máu không?"));
    }

    #[test]
    fn context_block_names_top_condition_risk_and_advice() {
        let r = result(vec![
            condition("Sốt xuất huyết", 60),
            condition("Cúm A", 85),
            condition("Sởi", 85),
        ]);
        let p = profile();
        let ctx = ChatContext {
            profile: &p,
            chief_complaint: "Nhóm Hô hấp",
            narrative: "chi tiết\n",
            result: &r,
        };
        let block = build_context_block(&ctx);
        assert!(block.contains("Bệnh nhân: Nữ, 27 tuổi.\n"));
        assert!(block.contains("Triệu chứng chính: Nhóm Hô hấp.\n"));
        assert!(block.contains("Chi tiết: chi tiết\n"));
        assert!(block.contains("- Chẩn đoán hàng đầu: Sốt xuất huyết (60% khớp).\n"));
        assert!(block.contains("- Mức độ: Cao - Khám ngay trong ngày.\n"));
        assert!(block.ends_with("- Lời khuyên: Đi khám trong ngày."));
    }

    #[test]
    fn context_block_without_conditions() {
        let r = result(vec![]);
        let p = profile();
        let ctx = ChatContext {
            profile: &p,
            chief_complaint: "Nhóm Da liễu",
            narrative: "",
            result: &r,
        };
        assert!(build_context_block(&ctx).contains("- Chẩn đoán hàng đầu: Chưa xác định.\n"));
    }

    #[test]
    fn append_is_append_only() {
        let turns = history(2);
        let first_ids: Vec<_> = turns.iter().map(|t| t.id).collect();
        let turns = append_turn(turns, ChatTurn::user("mới"));
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[..2].iter().map(|t| t.id).collect::<Vec<_>>(), first_ids);
        assert_eq!(turns[2].text, "mới");
    }
}
