/// フォームで編集可能な数値ステータスの種類を表す列挙型。
/// 各フィールドは固定の入力範囲を持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Health,
    Attack,
    Defense,
    Speed,
}

impl StatField {
    pub const ALL: [StatField; 4] = [
        StatField::Health,
        StatField::Attack,
        StatField::Defense,
        StatField::Speed,
    ];

    pub fn min(&self) -> i32 {
        1
    }

    pub fn max(&self) -> i32 {
        match self {
            StatField::Health => 999,
            _ => 100,
        }
    }

    /// 値を入力範囲に丸める。
    pub fn clamp(&self, value: i64) -> i32 {
        value.clamp(self.min() as i64, self.max() as i64) as i32
    }

    /// 入力欄の生の文字列を数値に変換し、範囲に丸める。
    ///
    /// - 空文字列は最小値 (1) として扱う
    /// - 先頭の整数部分のみを読む ("12abc" -> 12)
    /// - 数字が一つもなければ最小値
    pub fn parse_input(&self, input: &str) -> i32 {
        let s = input.trim();
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return self.min();
        }
        // 桁あふれは上限扱い
        let value = digits.parse::<i64>().unwrap_or(i64::MAX);
        self.clamp(if negative { -value } else { value })
    }

    /// 入力要素のIDに使う小文字の名前。
    pub fn key(&self) -> &'static str {
        match self {
            StatField::Health => "health",
            StatField::Attack => "attack",
            StatField::Defense => "defense",
            StatField::Speed => "speed",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for StatField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatField::Health => "Health",
            StatField::Attack => "Attack",
            StatField::Defense => "Defense",
            StatField::Speed => "Speed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_bounds() {
        assert_eq!(StatField::Health.parse_input("1000"), 999);
        assert_eq!(StatField::Health.parse_input("0"), 1);
        assert_eq!(StatField::Health.parse_input(""), 1);
        assert_eq!(StatField::Health.parse_input("150"), 150);
    }

    #[test]
    fn test_other_stat_bounds() {
        for field in [StatField::Attack, StatField::Defense, StatField::Speed] {
            assert_eq!(field.parse_input("101"), 100);
            assert_eq!(field.parse_input("0"), 1);
            assert_eq!(field.parse_input("-20"), 1);
            assert_eq!(field.parse_input("  "), 1);
        }
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(StatField::Speed.parse_input("12abc"), 12);
        assert_eq!(StatField::Speed.parse_input("abc"), 1);
        assert_eq!(StatField::Health.parse_input("99999999999999999999999"), 999);
    }

    #[test]
    fn test_key_lookup() {
        assert_eq!(StatField::from_key("defense"), Some(StatField::Defense));
        assert_eq!(StatField::from_key("name"), None);
    }
}
