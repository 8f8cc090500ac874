//! キャラクター設定フォームの状態を管理する。
//! 数値の丸め以外の検証 (項目間の整合性やアビリティ設定) は行わない。
use log::debug;

mod stat_field;
pub use stat_field::StatField;

use crate::interface::{Ability, Character, StatusEffect, StatusKind};

/// 1体分のキャラクターの下書きを保持するフォーム。
#[derive(Debug, Clone)]
pub struct CharacterForm {
    label: String,
    character: Character,
}

impl CharacterForm {
    pub fn new(label: &str, default_character: Character) -> Self {
        Self {
            label: label.to_owned(),
            character: default_character,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    /// 入力要素のID。 例: `"Character 1-health"`
    pub fn input_id(&self, field: &str) -> String {
        format!("{}-{}", self.label, field)
    }

    /// 名前を更新し、更新後のレコード全体を返す。
    pub fn set_name(&mut self, name: &str) -> &Character {
        self.character.name = name.to_owned();
        debug!("{} name -> {:?}", self.label, self.character.name);
        &self.character
    }

    /// 数値ステータスを入力文字列から更新し、更新後のレコード全体を返す。
    pub fn set_stat(&mut self, field: StatField, input: &str) -> &Character {
        let value = field.parse_input(input);
        let slot = match field {
            StatField::Health => &mut self.character.health,
            StatField::Attack => &mut self.character.attack,
            StatField::Defense => &mut self.character.defense,
            StatField::Speed => &mut self.character.speed,
        };
        *slot = value;
        debug!("{} {} {:?} -> {}", self.label, field, input, value);
        &self.character
    }

    pub fn stat(&self, field: StatField) -> i32 {
        match field {
            StatField::Health => self.character.health,
            StatField::Attack => self.character.attack,
            StatField::Defense => self.character.defense,
            StatField::Speed => self.character.speed,
        }
    }
}

/// 1人目の初期キャラクター。
pub fn default_warrior() -> Character {
    Character {
        id: String::new(),
        name: "Warrior".to_owned(),
        health: 100,
        attack: 15,
        defense: 10,
        speed: 8,
        status_effects: Vec::new(),
        abilities: vec![
            Ability::new("Basic Attack", 10, 0),
            Ability::new("Power Strike", 20, 2)
                .with_effect(StatusEffect::new(StatusKind::Enraged, 2, 20)),
        ],
    }
}

/// 2人目の初期キャラクター。
pub fn default_mage() -> Character {
    Character {
        id: String::new(),
        name: "Mage".to_owned(),
        health: 80,
        attack: 20,
        defense: 5,
        speed: 12,
        status_effects: Vec::new(),
        abilities: vec![
            Ability::new("Basic Attack", 8, 0),
            Ability::new("Fireball", 15, 2)
                .with_effect(StatusEffect::new(StatusKind::Burning, 3, 5)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_emits_full_record() {
        let mut form = CharacterForm::new("Character 1", default_warrior());
        let emitted = form.set_name("Test Warrior").clone();
        assert_eq!(emitted.name, "Test Warrior");
        assert_eq!(emitted.health, 100);
        assert_eq!(emitted.abilities.len(), 2);

        let emitted = form.set_stat(StatField::Health, "150");
        assert_eq!(emitted.health, 150);
        assert_eq!(emitted.name, "Test Warrior");
    }

    #[test]
    fn test_clamps_on_every_edit() {
        let mut form = CharacterForm::new("Character 2", default_mage());
        assert_eq!(form.set_stat(StatField::Health, "1000").health, 999);
        assert_eq!(form.set_stat(StatField::Health, "").health, 1);
        assert_eq!(form.set_stat(StatField::Attack, "101").attack, 100);
        assert_eq!(form.set_stat(StatField::Attack, "0").attack, 1);
        assert_eq!(form.stat(StatField::Health), 1);
    }

    #[test]
    fn test_input_id() {
        let form = CharacterForm::new("Character 1", default_warrior());
        assert_eq!(form.input_id("name"), "Character 1-name");
        assert_eq!(form.input_id(StatField::Speed.key()), "Character 1-speed");
    }
}
