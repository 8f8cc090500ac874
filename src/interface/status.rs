use serde::{Deserialize, Serialize};

/// 状態異常の種類を表す列挙型。
/// 未知のタグはサーバーから受け取った文字列のまま保持する。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum StatusKind {
    Accelerate,
    Burning,
    Poisoned,
    Enraged,
    Regenerating,
    Other(String),
}

impl StatusKind {
    /// ワイヤ上のタグ文字列を取得する。
    pub fn as_str(&self) -> &str {
        match self {
            StatusKind::Accelerate => "ACCELERATE",
            StatusKind::Burning => "BURNING",
            StatusKind::Poisoned => "POISON",
            StatusKind::Enraged => "ENRAGED",
            StatusKind::Regenerating => "REGENERATING",
            StatusKind::Other(s) => s.as_str(),
        }
    }

    /// 空タグ (Go 側のゼロ値) かどうかを判定する。
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<String> for StatusKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ACCELERATE" => StatusKind::Accelerate,
            "BURNING" => StatusKind::Burning,
            "POISON" => StatusKind::Poisoned,
            "ENRAGED" => StatusKind::Enraged,
            "REGENERATING" => StatusKind::Regenerating,
            _ => StatusKind::Other(s),
        }
    }
}

impl From<StatusKind> for String {
    fn from(kind: StatusKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// キャラクターに付与された状態異常。
/// 子に種類、残りターン数、効果量を持つ。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct StatusEffect {
    #[serde(rename = "Type")]
    pub kind: StatusKind,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub potency: i32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, duration: i32, potency: i32) -> Self {
        Self {
            kind,
            duration,
            potency,
        }
    }
}
