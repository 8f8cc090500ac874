use crate::interface::{Battle, Character};

/// 画面上のキャラクター枠。 `First` が Character1 に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::First, Slot::Second];

    pub fn index(&self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Slot::First),
            1 => Some(Slot::Second),
            _ => None,
        }
    }

    pub fn opponent(&self) -> Slot {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }

    /// 戦闘からこの枠のキャラクターを取り出す。
    pub fn of<'a>(&self, battle: &'a Battle) -> &'a Character {
        match self {
            Slot::First => &battle.character1,
            Slot::Second => &battle.character2,
        }
    }
}

/// 手番表示用の推定。サーバーの実際の行動順には一切影響しない。
///
/// Character2 の方が速ければ、行動回数が偶数のときに Character2 の手番とみなす。
/// それ以外 (同速を含む) は偶数のときに Character1 の手番。
/// ACTIVE 以外の戦闘では誰の手番でもない。
pub fn current_turn(battle: &Battle, actions_taken: u32) -> Option<Slot> {
    if !battle.is_active() {
        return None;
    }
    let second_moves_first = battle.character2.speed > battle.character1.speed;
    let even = actions_taken % 2 == 0;
    if second_moves_first == even {
        Some(Slot::Second)
    } else {
        Some(Slot::First)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{default_mage, default_warrior};
    use crate::interface::BattleState;

    fn battle(speed1: i32, speed2: i32, state: BattleState) -> Battle {
        let mut c1 = default_warrior();
        let mut c2 = default_mage();
        c1.speed = speed1;
        c2.speed = speed2;
        Battle {
            id: "b".to_owned(),
            character1: c1,
            character2: c2,
            state,
            round: 1,
            winner: None,
        }
    }

    #[test]
    fn test_faster_second_moves_first() {
        let b = battle(8, 12, BattleState::Active);
        assert_eq!(current_turn(&b, 0), Some(Slot::Second));
        assert_eq!(current_turn(&b, 1), Some(Slot::First));
        assert_eq!(current_turn(&b, 2), Some(Slot::Second));
    }

    #[test]
    fn test_tie_goes_to_first() {
        let b = battle(10, 10, BattleState::Active);
        assert_eq!(current_turn(&b, 0), Some(Slot::First));
        assert_eq!(current_turn(&b, 1), Some(Slot::Second));
    }

    #[test]
    fn test_no_turn_outside_active() {
        assert_eq!(current_turn(&battle(8, 12, BattleState::Pending), 0), None);
        assert_eq!(current_turn(&battle(8, 12, BattleState::Complete), 3), None);
    }
}
