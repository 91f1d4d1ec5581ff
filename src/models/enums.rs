use serde::{Deserialize, Serialize};

/// Unknown string for a string-backed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: '{value}'")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The serde representation is the same string as `as_str`.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            pub fn all() -> &'static [$name] {
                &[$(Self::$variant),+]
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Gender {
    Male => "Nam",
    Female => "Nữ",
    Other => "Khác",
});

impl Default for Gender {
    fn default() -> Self {
        Self::Male
    }
}

str_enum!(BodyRegion {
    Head => "head",
    Chest => "chest",
    Abdomen => "abdomen",
    Pelvis => "pelvis",
    Limbs => "limbs",
    Systemic => "systemic",
});

str_enum!(QuestionType {
    Single => "single",
    Multiple => "multiple",
    Scale => "scale",
    Text => "text",
});

// Triage tiers, most conservative last. The strings are the wire values of
// the analysis contract and must not be translated.
str_enum!(RiskLevel {
    Low => "Thấp - Tự chăm sóc",
    Medium => "Trung bình - Nên đi khám",
    High => "Cao - Khám ngay trong ngày",
    Emergency => "Khẩn cấp - Gọi cấp cứu 115",
});

impl RiskLevel {
    /// Emergency tier: the report offers a direct call to 115.
    pub fn is_emergency(&self) -> bool {
        matches!(self, Self::Emergency)
    }
}

str_enum!(ChatRole {
    User => "user",
    Assistant => "assistant",
});
