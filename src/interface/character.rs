use serde::{Deserialize, Deserializer, Serialize};

use crate::interface::StatusEffect;

/// 戦闘に参加するキャラクターを表す構造体。
/// 子にID、名前、各種ステータス、状態異常のリスト、アビリティのリストを持つ。
///
/// ID はサーバーが採番するため、作成前は空文字列となる。
/// Go 側の nil スライスは `null` として届くため、空のベクタとして補完する。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Character {
    #[serde(rename = "ID", default)]
    pub id: String,
    pub name: String,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status_effects: Vec<StatusEffect>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub abilities: Vec<Ability>,
}

impl Character {
    /// サーバーからIDが振られているかどうかを判定する。
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn ability(&self, index: usize) -> Option<&Ability> {
        self.abilities.get(index)
    }
}

/// キャラクターが使用できる技。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Ability {
    pub name: String,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub cooldown_max: i32,
    /// 現在の残りクールダウン。作成リクエストには含めない。
    #[serde(default, skip_serializing)]
    pub cooldown: i32,
    #[serde(
        default,
        deserialize_with = "empty_effect_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_effect: Option<StatusEffect>,
}

impl Ability {
    pub fn new(name: &str, damage: i32, cooldown_max: i32) -> Self {
        Self {
            name: name.to_owned(),
            damage,
            cooldown_max,
            cooldown: 0,
            status_effect: None,
        }
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.status_effect = Some(effect);
        self
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// バックエンドは状態異常なしを {"Type":""} で返す
fn empty_effect_as_none<'de, D>(deserializer: D) -> Result<Option<StatusEffect>, D::Error>
where
    D: Deserializer<'de>,
{
    let effect = Option::<StatusEffect>::deserialize(deserializer)?;
    Ok(effect.filter(|e| !e.kind.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::StatusKind;

    #[test]
    fn test_backend_character_json() {
        let json = r#"{
            "ID": "c1",
            "Name": "Warrior",
            "Health": 90,
            "Attack": 15,
            "Defense": 10,
            "Speed": 8,
            "StatusEffects": null,
            "Abilities": [
                {"Name": "Basic Attack", "Damage": 10, "CooldownMax": 0, "Cooldown": 0,
                 "StatusEffect": {"Type": "", "Duration": 0, "Potency": 0}},
                {"Name": "Power Strike", "Damage": 20, "CooldownMax": 2, "Cooldown": 1,
                 "StatusEffect": {"Type": "ENRAGED", "Duration": 2, "Potency": 20}}
            ]
        }"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, "c1");
        assert!(c.status_effects.is_empty());
        assert_eq!(c.abilities[0].status_effect, None);
        assert_eq!(c.abilities[1].cooldown, 1);
        assert_eq!(
            c.abilities[1].status_effect.as_ref().map(|e| e.kind.clone()),
            Some(StatusKind::Enraged)
        );
    }

    #[test]
    fn test_draft_serialization_omits_server_fields() {
        let c = Character {
            id: String::new(),
            name: "Mage".to_owned(),
            health: 80,
            attack: 20,
            defense: 5,
            speed: 12,
            status_effects: vec![],
            abilities: vec![Ability::new("Basic Attack", 8, 0)],
        };
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["ID"], "");
        assert_eq!(json["Abilities"][0]["CooldownMax"], 0);
        assert!(json["Abilities"][0].get("Cooldown").is_none());
        assert!(json["Abilities"][0].get("StatusEffect").is_none());
    }
}
