use crate::models::{ChatTurn, ScreeningResult};

pub const CHAT_SYSTEM_INSTRUCTION: &str = "\
Bạn là Bác sĩ AI tư vấn trực tuyến của VN HealthGuard.
Phong cách trả lời: Chuyên nghiệp, Khách quan, Dựa trên bằng chứng (Evidence-based), giống phong cách WebMD/Healthline.

Hướng dẫn:
1. Trả lời câu hỏi người dùng dựa trên ngữ cảnh bệnh án đã có.
2. Nếu người dùng hỏi về điều trị, hãy đưa ra phác đồ điều trị tiêu chuẩn (Standard of Care) cho các bệnh thông thường, \
nhưng LUÔN kèm theo khuyến cáo \"Đây là thông tin tham khảo, vui lòng tuân thủ chỉ định của bác sĩ\".
3. Nếu triệu chứng nguy hiểm, hãy giục người dùng đi bệnh viện ngay.
4. Giải thích cơ chế bệnh sinh đơn giản nếu được hỏi.";

/// Assistant turn appended when a chat exchange fails.
pub const FALLBACK_REPLY: &str =
    "Xin lỗi, đã có lỗi xảy ra khi kết nối với máy chủ AI. Vui lòng thử lại.";

/// Replaces an empty service reply.
pub const EMPTY_REPLY: &str = "Xin lỗi, tôi cần suy nghĩ thêm.";

/// Opening assistant turn, quoting the screening summary.
pub fn welcome_turn(result: &ScreeningResult) -> ChatTurn {
    ChatTurn::assistant(format!(
        "Chào bạn, tôi là trợ lý ảo của VN HealthGuard. Dựa trên kết quả sàng lọc \"{}\", \
         bạn có câu hỏi gì thêm về tình trạng sức khỏe, đơn thuốc tham khảo hay cách chăm sóc không?",
        result.summary
    ))
}

/// Service reply, or the fixed text when it came back blank.
pub fn reply_or_default(reply: String) -> String {
    if reply.trim().is_empty() {
        EMPTY_REPLY.to_string()
    } else {
        reply
    }
}
