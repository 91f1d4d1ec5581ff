//! Static screening catalog: disease categories, the general and
//! epidemiology question blocks, and the medical history checklist.
//!
//! Entries are plain records keyed by id. Catalog order is the display order
//! and is preserved by every filter.

use crate::models::{BodyRegion, CategoryFlow, Question, QuestionType};

// ═══════════════════════════════════════════
// Intake checklist
// ═══════════════════════════════════════════

pub const MEDICAL_HISTORY_OPTIONS: &[&str] = &[
    "Không có",
    "Tiểu đường",
    "Tăng huyết áp",
    "Hen suyễn",
    "Bệnh tim mạch",
    "Suy giảm miễn dịch",
    "Đang mang thai",
    "Hút thuốc lá",
    "Viêm gan B/C",
    "Dị ứng thuốc",
];

// ═══════════════════════════════════════════
// Fixed question blocks
// ═══════════════════════════════════════════

pub const FEVER_QUESTION_ID: &str = "fever_status";
pub const PAIN_SCALE_QUESTION_ID: &str = "pain_level";
pub const DURATION_QUESTION_ID: &str = "symptom_duration";

/// Asked first, for every category.
pub static GENERAL_QUESTIONS: &[Question] = &[
    Question {
        id: FEVER_QUESTION_ID,
        text: "Tình trạng sốt?",
        kind: QuestionType::Single,
        options: &[
            "Không sốt",
            "Sốt nhẹ (37.5 - 38°C)",
            "Sốt cao (38 - 39.5°C)",
            "Sốt rất cao (> 39.5°C)",
            "Sốt về chiều/đêm",
        ],
    },
    Question {
        id: PAIN_SCALE_QUESTION_ID,
        text: "Mức độ khó chịu/đau (1-10)",
        kind: QuestionType::Scale,
        options: &[],
    },
    Question {
        id: DURATION_QUESTION_ID,
        text: "Triệu chứng kéo dài bao lâu?",
        kind: QuestionType::Single,
        options: &[
            "Vừa mới (< 24h)",
            "1 - 3 ngày",
            "4 - 7 ngày",
            "> 1 tuần",
            "Mãn tính (> 1 tháng)",
        ],
    },
];

/// Asked last, for every category.
pub static EPIDEMIOLOGY_QUESTIONS: &[Question] = &[Question {
    id: "epi_risk",
    text: "Yếu tố nguy cơ & Dịch tễ:",
    kind: QuestionType::Multiple,
    options: &[
        "Không rõ",
        "Tiếp xúc người mắc bệnh truyền nhiễm (Cúm, COVID, Sởi...)",
        "Sống/Đến vùng có Sốt xuất huyết/Sốt rét",
        "Ăn thực phẩm lạ/tươi sống gần đây",
        "Quan hệ tình dục không an toàn",
        "Tiền sử gia đình có bệnh di truyền",
    ],
}];

// ═══════════════════════════════════════════
// Disease categories
// ═══════════════════════════════════════════

pub static CATEGORY_FLOWS: &[CategoryFlow] = &[
    CategoryFlow {
        id: "respiratory",
        label: "Nhóm Hô hấp",
        keywords: &["ho", "khó thở", "phổi", "họng", "sổ mũi", "cúm", "đờm", "thở rít"],
        body_region: BodyRegion::Chest,
        questions: &[
            Question {
                id: "resp_symptom",
                text: "Triệu chứng hô hấp chính?",
                kind: QuestionType::Multiple,
                options: &[
                    "Ho khan",
                    "Ho có đờm",
                    "Ho ra máu",
                    "Đau họng",
                    "Sổ mũi/Nghẹt mũi",
                    "Khó thở",
                ],
            },
            Question {
                id: "resp_sputum",
                text: "Màu sắc đờm (nếu có)?",
                kind: QuestionType::Single,
                options: &["Không có", "Trong/Trắng", "Vàng/Xanh", "Gỉ sắt/Nâu", "Có lẫn máu"],
            },
            Question {
                id: "resp_breath",
                text: "Tính chất khó thở?",
                kind: QuestionType::Single,
                options: &[
                    "Không khó thở",
                    "Khó thở khi gắng sức",
                    "Khó thở khi nằm",
                    "Thở khò khè/rít",
                ],
            },
        ],
    },
    CategoryFlow {
        id: "cardiovascular",
        label: "Nhóm Tim mạch",
        keywords: &["tim", "đau ngực", "hồi hộp", "đánh trống ngực", "huyết áp", "ngất", "phù chân"],
        body_region: BodyRegion::Chest,
        questions: &[
            Question {
                id: "cardio_pain",
                text: "Đặc điểm đau ngực?",
                kind: QuestionType::Single,
                options: &[
                    "Không đau",
                    "Đau nhói như dao đâm",
                    "Đè nặng/Thắt nghẹt giữa ngực",
                    "Đau lan ra tay trái/cằm",
                    "Đau tăng khi ấn vào",
                ],
            },
            Question {
                id: "cardio_other",
                text: "Dấu hiệu kèm theo?",
                kind: QuestionType::Multiple,
                options: &[
                    "Hồi hộp/Đánh trống ngực",
                    "Khó thở khi nằm đầu thấp",
                    "Phù 2 chân",
                    "Tím môi/đầu chi",
                    "Ngất xỉu",
                ],
            },
        ],
    },
    CategoryFlow {
        id: "digestive",
        label: "Nhóm Tiêu hóa – Gan mật",
        keywords: &["bụng", "nôn", "tiêu chảy", "táo bón", "dạ dày", "gan", "vàng da", "ăn"],
        body_region: BodyRegion::Abdomen,
        questions: &[
            Question {
                id: "dig_pain_loc",
                text: "Vị trí đau bụng?",
                kind: QuestionType::Single,
                options: &[
                    "Không đau",
                    "Thượng vị (Trên rốn)",
                    "Quanh rốn",
                    "Hạ sườn phải",
                    "Bụng dưới",
                    "Đau khắp bụng",
                ],
            },
            Question {
                id: "dig_stool",
                text: "Đại tiện?",
                kind: QuestionType::Single,
                options: &[
                    "Bình thường",
                    "Táo bón",
                    "Tiêu chảy",
                    "Phân đen như bã cafe",
                    "Phân có máu tươi",
                    "Phân bạc màu",
                ],
            },
            Question {
                id: "dig_liver",
                text: "Dấu hiệu gan mật?",
                kind: QuestionType::Multiple,
                options: &[
                    "Vàng da/Vàng mắt",
                    "Nước tiểu sẫm màu",
                    "Ngứa da",
                    "Chán ăn/Sợ mỡ",
                    "Đắng miệng",
                ],
            },
        ],
    },
    CategoryFlow {
        id: "neurology",
        label: "Nhóm Thần kinh – Tâm thần",
        keywords: &["đau đầu", "chóng mặt", "ngất", "co giật", "mất ngủ", "lo âu", "nhớ", "liệt"],
        body_region: BodyRegion::Head,
        questions: &[
            Question {
                id: "neuro_headache",
                text: "Đau đầu như thế nào?",
                kind: QuestionType::Single,
                options: &[
                    "Không đau",
                    "Đau nửa đầu",
                    "Đau cả đầu",
                    "Đau vùng gáy",
                    "Đau dữ dội đột ngột",
                ],
            },
            Question {
                id: "neuro_func",
                text: "Chức năng thần kinh?",
                kind: QuestionType::Multiple,
                options: &[
                    "Yếu/Liệt tay chân",
                    "Nói khó/Méo miệng",
                    "Nhìn mờ/Nhìn đôi",
                    "Co giật",
                    "Tê bì chân tay",
                ],
            },
            Question {
                id: "psych_state",
                text: "Tâm thần & Giấc ngủ?",
                kind: QuestionType::Single,
                options: &[
                    "Bình thường",
                    "Mất ngủ kéo dài",
                    "Lo âu/Hồi hộp",
                    "Buồn chán/Mất hứng thú",
                    "Kích động",
                ],
            },
        ],
    },
    CategoryFlow {
        id: "musculoskeletal",
        label: "Nhóm Cơ – Xương – Khớp",
        keywords: &["xương", "khớp", "cơ", "lưng", "gối", "vai", "đau mỏi", "sưng khớp"],
        body_region: BodyRegion::Limbs,
        questions: &[
            Question {
                id: "msk_loc",
                text: "Vị trí đau chính?",
                kind: QuestionType::Multiple,
                options: &[
                    "Cột sống cổ/thắt lưng",
                    "Khớp gối/háng",
                    "Khớp nhỏ bàn tay/chân",
                    "Đau cơ bắp",
                    "Đau sau chấn thương",
                ],
            },
            Question {
                id: "msk_sign",
                text: "Dấu hiệu tại khớp?",
                kind: QuestionType::Single,
                options: &[
                    "Không sưng",
                    "Sưng nóng đỏ đau",
                    "Cứng khớp buổi sáng",
                    "Biến dạng khớp",
                    "Kêu lạo xạo khi vận động",
                ],
            },
        ],
    },
    CategoryFlow {
        id: "genitourinary",
        label: "Nhóm Tiết niệu – Sinh dục",
        keywords: &["tiểu", "thận", "sinh dục", "kinh nguyệt", "bàng quang", "hông lưng"],
        body_region: BodyRegion::Pelvis,
        questions: &[
            Question {
                id: "gu_urine",
                text: "Rối loạn tiểu tiện?",
                kind: QuestionType::Multiple,
                options: &[
                    "Tiểu buốt/Tiểu rắt",
                    "Tiểu ra máu",
                    "Tiểu đêm nhiều",
                    "Tiểu không tự chủ",
                    "Bí tiểu",
                ],
            },
            Question {
                id: "gu_pain",
                text: "Đau vùng hông/lưng?",
                kind: QuestionType::Single,
                options: &[
                    "Không",
                    "Đau âm ỉ thắt lưng",
                    "Đau quặn dữ dội từng cơn (Cơn đau quặn thận)",
                    "Đau vùng hạ vị",
                ],
            },
            Question {
                id: "gu_sex",
                text: "Vấn đề sinh dục (Nam/Nữ)?",
                kind: QuestionType::Multiple,
                options: &[
                    "Không",
                    "Ra khí hư/dịch bất thường",
                    "Rối loạn kinh nguyệt",
                    "Đau/Sưng bộ phận sinh dục",
                    "Ngứa vùng kín",
                ],
            },
        ],
    },
    CategoryFlow {
        id: "endocrine",
        label: "Nhóm Nội tiết – Chuyển hóa",
        keywords: &["tiểu đường", "tuyến giáp", "mệt mỏi", "sụt cân", "béo phì", "khát", "run tay"],
        body_region: BodyRegion::Systemic,
        questions: &[
            Question {
                id: "endo_weight",
                text: "Thay đổi cân nặng?",
                kind: QuestionType::Single,
                options: &["Ổn định", "Sụt cân nhanh không rõ lý do", "Tăng cân nhanh"],
            },
            Question {
                id: "endo_general",
                text: "Triệu chứng toàn thân?",
                kind: QuestionType::Multiple,
                options: &[
                    "Ăn nhiều/Uống nhiều/Tiểu nhiều",
                    "Run tay",
                    "Nhịp tim nhanh",
                    "Chịu nóng/lạnh kém",
                    "Mệt mỏi kiệt sức",
                ],
            },
        ],
    },
    CategoryFlow {
        id: "dermatology",
        label: "Nhóm Da – Mô mềm – Dị ứng",
        keywords: &["da", "ngứa", "mẩn đỏ", "phát ban", "mề đay", "dị ứng", "mụn"],
        body_region: BodyRegion::Limbs,
        questions: &[
            Question {
                id: "derm_lesion",
                text: "Tổn thương da?",
                kind: QuestionType::Multiple,
                options: &[
                    "Mẩn đỏ/Phát ban",
                    "Mụn nước/Phồng rộp",
                    "Lở loét",
                    "Sưng nề (Môi/Mắt)",
                    "Nổi cục/u",
                ],
            },
            Question {
                id: "derm_feel",
                text: "Cảm giác?",
                kind: QuestionType::Single,
                options: &["Bình thường", "Ngứa nhiều", "Đau rát", "Mất cảm giác"],
            },
        ],
    },
    CategoryFlow {
        id: "hematology",
        label: "Nhóm Huyết học – Miễn dịch",
        keywords: &["máu", "bầm tím", "hạch", "sốt kéo dài", "nhiễm trùng", "miễn dịch"],
        body_region: BodyRegion::Systemic,
        questions: &[
            Question {
                id: "hema_bleed",
                text: "Dấu hiệu xuất huyết?",
                kind: QuestionType::Multiple,
                options: &[
                    "Không",
                    "Chảy máu cam/Chân răng",
                    "Vết bầm tím tự nhiên trên da",
                    "Kinh nguyệt kéo dài/nhiều",
                    "Xuất huyết dưới da",
                ],
            },
            Question {
                id: "hema_other",
                text: "Dấu hiệu khác?",
                kind: QuestionType::Multiple,
                options: &[
                    "Sốt kéo dài không rõ nguyên nhân",
                    "Nổi hạch (Cổ, nách, bẹn)",
                    "Da xanh xao/Nhợt nhạt",
                    "Hay bị nhiễm trùng",
                ],
            },
        ],
    },
];

/// Look up a category by id.
pub fn find_category(id: &str) -> Option<&'static CategoryFlow> {
    CATEGORY_FLOWS.iter().find(|c| c.id == id)
}
