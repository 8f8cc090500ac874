use serde::{Deserialize, Serialize};

use crate::interface::Character;

/// 戦闘のライフサイクル状態。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleState {
    Pending,
    Active,
    Complete,
}

impl std::fmt::Display for BattleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BattleState::Pending => "PENDING",
            BattleState::Active => "ACTIVE",
            BattleState::Complete => "COMPLETE",
        };
        write!(f, "{}", s)
    }
}

/// サーバーが返す戦闘の状態。
/// 子に戦闘ID、2体のキャラクター、状態、ラウンド数、勝者を持つ。
/// 応答のたびに丸ごと置き換えられる。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Battle {
    #[serde(rename = "ID")]
    pub id: String,
    pub character1: Character,
    pub character2: Character,
    pub state: BattleState,
    #[serde(default)]
    pub round: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Character>,
}

impl Battle {
    pub fn is_active(&self) -> bool {
        self.state == BattleState::Active
    }

    pub fn is_complete(&self) -> bool {
        self.state == BattleState::Complete
    }

    /// 決着済みの場合のみ勝者を返す。
    pub fn decided_winner(&self) -> Option<&Character> {
        if self.is_complete() {
            self.winner.as_ref()
        } else {
            None
        }
    }
}

/// `POST /battles` のリクエストボディ。
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct CreateBattleRequest<'a> {
    pub character1: &'a Character,
    pub character2: &'a Character,
}

/// 行動リクエスト。永続化されるエンティティではなく、単なるワイヤメッセージ。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BattleAction {
    #[serde(rename = "CharacterID")]
    pub character_id: String,
    #[serde(rename = "AbilityIndex")]
    pub ability_index: usize,
    #[serde(rename = "TargetID")]
    pub target_id: String,
}

/// `POST /battles/{id}/action` のレスポンス。
/// このボディだけはキーが小文字で届く。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub battle: Option<Battle>,
}

impl ActionResponse {
    /// 失敗時にユーザーへ表示するメッセージ。
    pub fn failure_message(&self) -> String {
        match self.message.as_deref() {
            Some(m) if !m.is_empty() => m.to_owned(),
            _ => "Action failed".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "ID": id, "Name": name, "Health": 50, "Attack": 10,
            "Defense": 5, "Speed": 7, "StatusEffects": [], "Abilities": []
        })
    }

    #[test]
    fn test_battle_without_winner() {
        let json = serde_json::json!({
            "ID": "b1",
            "Character1": character_json("c1", "A"),
            "Character2": character_json("c2", "B"),
            "State": "ACTIVE",
            "Round": 3
        });
        let battle: Battle = serde_json::from_value(json).unwrap();
        assert!(battle.is_active());
        assert_eq!(battle.round, 3);
        assert!(battle.winner.is_none());
        assert!(battle.decided_winner().is_none());
    }

    #[test]
    fn test_action_payload_keys() {
        let action = BattleAction {
            character_id: "c1".to_owned(),
            ability_index: 1,
            target_id: "c2".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            serde_json::json!({"CharacterID": "c1", "AbilityIndex": 1, "TargetID": "c2"})
        );
    }

    #[test]
    fn test_action_response_failure_message() {
        let res: ActionResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(res.failure_message(), "Action failed");
        let res: ActionResponse =
            serde_json::from_str(r#"{"success":false,"message":"ability on cooldown"}"#).unwrap();
        assert_eq!(res.failure_message(), "ability on cooldown");
    }
}
