use serde_json::{json, Value};

use crate::config::ANALYSIS_TEMPERATURE;
use crate::models::RiskLevel;
use crate::pipeline::client::AnalysisRequest;

/// Instruction wrapped around the clinical narrative.
///
/// The narrative lands between the header and the task list, verbatim.
const ANALYSIS_PROMPT_HEADER: &str = "\
Đóng vai trò là Hệ thống Kiểm tra Triệu chứng (Symptom Checker) chuẩn y khoa quốc tế \
(như WebMD, Mayo Clinic) nhưng được tối ưu hóa cho bối cảnh y tế Việt Nam.

DỮ LIỆU LÂM SÀNG:
";

const ANALYSIS_PROMPT_TASKS: &str = "
NHIỆM VỤ:
1. Thực hiện Chẩn đoán phân biệt (Differential Diagnosis), sắp xếp theo độ khớp giảm dần.
2. Tính toán \"Độ khớp\" (Match Percentage, 0-100) cho từng bệnh dựa trên số lượng triệu chứng trùng khớp.
3. Đặc biệt lưu ý các bệnh nhiệt đới và truyền nhiễm phổ biến tại Việt Nam:
   - Sốt xuất huyết (Dengue): Sốt cao, đau hốc mắt, xuất huyết, tiểu cầu giảm (nếu có).
   - Cúm A/B, Sởi, Thủy đậu.
   - Tay Chân Miệng (ở trẻ em).
   - Ngộ độc thực phẩm / Rối loạn tiêu hóa.
4. Đánh giá mức độ khẩn cấp (Triage) cực kỳ thận trọng. Nếu có dấu hiệu nguy hiểm \
(khó thở, li bì, đau ngực dữ dội...), phải báo Khẩn cấp.

YÊU CẦU OUTPUT:
Trả về JSON tuân thủ schema đã cung cấp. Ngôn ngữ: Tiếng Việt y khoa chuẩn mực, dễ hiểu.
";

/// Build the one-shot analysis request for a compiled narrative.
pub fn build_analysis_request(narrative: &str) -> AnalysisRequest {
    AnalysisRequest {
        prompt: build_analysis_prompt(narrative),
        schema: screening_response_schema(),
        temperature: ANALYSIS_TEMPERATURE,
    }
}

pub fn build_analysis_prompt(narrative: &str) -> String {
    let mut prompt = String::with_capacity(
        ANALYSIS_PROMPT_HEADER.len() + narrative.len() + ANALYSIS_PROMPT_TASKS.len(),
    );
    prompt.push_str(ANALYSIS_PROMPT_HEADER);
    prompt.push_str(narrative);
    prompt.push_str(ANALYSIS_PROMPT_TASKS);
    prompt
}

/// Response schema in the service's OpenAPI subset.
pub fn screening_response_schema() -> Value {
    let risk_levels: Vec<&str> = RiskLevel::all().iter().map(RiskLevel::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "riskLevel": {
                "type": "STRING",
                "enum": risk_levels,
                "description": "Mức độ khẩn cấp dựa trên triage y tế chuẩn."
            },
            "triageMessage": {
                "type": "STRING",
                "description": "Câu hành động ngắn gọn, súc tích (VD: Gọi 115 ngay lập tức hoặc Đi khám đa khoa trong 24h)."
            },
            "summary": {
                "type": "STRING",
                "description": "Tổng quan tình trạng lâm sàng của bệnh nhân."
            },
            "potentialConditions": {
                "type": "ARRAY",
                "description": "Danh sách chẩn đoán phân biệt, sắp xếp theo độ khớp (Match %).",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "Tên bệnh" },
                        "matchPercentage": { "type": "NUMBER", "description": "Độ khớp triệu chứng (0-100)" },
                        "description": { "type": "STRING", "description": "Mô tả ngắn về bệnh trong ngữ cảnh này" },
                        "reasoning": { "type": "STRING", "description": "Các triệu chứng của bệnh nhân KHỚP với bệnh này" },
                        "missingSymptoms": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "Các triệu chứng điển hình của bệnh này mà bệnh nhân KHÔNG có"
                        }
                    },
                    "required": ["name", "matchPercentage", "description", "reasoning"]
                }
            },
            "careAdvice": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Hướng dẫn tự chăm sóc chi tiết từng bước."
            },
            "recommendedSpecialist": {
                "type": "STRING",
                "description": "Chuyên khoa chính xác nhất để khám."
            }
        },
        "required": [
            "riskLevel",
            "triageMessage",
            "summary",
            "potentialConditions",
            "careAdvice",
            "recommendedSpecialist"
        ]
    })
}
