use core::fmt;
use serde::{Deserialize, Serialize};

/// Highest number-card value in the deck.
pub const MAX_NUMBER: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    Plus2,
    Plus4,
    Plus6,
    Plus8,
    Plus10,
    Double,
}

impl ModifierKind {
    pub const ALL: [ModifierKind; 6] = [
        ModifierKind::Plus2,
        ModifierKind::Plus4,
        ModifierKind::Plus6,
        ModifierKind::Plus8,
        ModifierKind::Plus10,
        ModifierKind::Double,
    ];

    /// Flat bonus added after the multiplier step; zero for `x2`.
    pub const fn bonus(self) -> u32 {
        match self {
            ModifierKind::Plus2 => 2,
            ModifierKind::Plus4 => 4,
            ModifierKind::Plus6 => 6,
            ModifierKind::Plus8 => 8,
            ModifierKind::Plus10 => 10,
            ModifierKind::Double => 0,
        }
    }

    pub const fn is_multiplier(self) -> bool {
        matches!(self, ModifierKind::Double)
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModifierKind::Plus2 => "+2",
            ModifierKind::Plus4 => "+4",
            ModifierKind::Plus6 => "+6",
            ModifierKind::Plus8 => "+8",
            ModifierKind::Plus10 => "+10",
            ModifierKind::Double => "x2",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Freeze,
    FlipThree,
    SecondChance,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [
        ActionKind::Freeze,
        ActionKind::FlipThree,
        ActionKind::SecondChance,
    ];

    /// Copies of each action kind in the deck.
    pub const COPIES: usize = 3;
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::Freeze => "Freeze",
            ActionKind::FlipThree => "Flip3",
            ActionKind::SecondChance => "SecondChance",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Card {
    Number(u8),
    Modifier(ModifierKind),
    Action(ActionKind),
}

impl Card {
    pub const fn is_number(self) -> bool {
        matches!(self, Card::Number(_))
    }

    pub const fn is_action(self) -> bool {
        matches!(self, Card::Action(_))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Number(value) => write!(f, "{value}"),
            Card::Modifier(kind) => write!(f, "{kind}"),
            Card::Action(kind) => write!(f, "{kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionKind, Card, ModifierKind};

    #[test]
    fn modifier_bonuses_match_labels() {
        assert_eq!(ModifierKind::Plus2.bonus(), 2);
        assert_eq!(ModifierKind::Plus10.bonus(), 10);
        assert_eq!(ModifierKind::Double.bonus(), 0);
        assert!(ModifierKind::Double.is_multiplier());
        assert!(!ModifierKind::Plus6.is_multiplier());
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Card::Number(7).to_string(), "7");
        assert_eq!(Card::Modifier(ModifierKind::Plus4).to_string(), "+4");
        assert_eq!(Card::Modifier(ModifierKind::Double).to_string(), "x2");
        assert_eq!(Card::Action(ActionKind::FlipThree).to_string(), "Flip3");
    }

    #[test]
    fn card_kind_predicates() {
        assert!(Card::Number(0).is_number());
        assert!(Card::Action(ActionKind::Freeze).is_action());
        assert!(!Card::Modifier(ModifierKind::Plus2).is_number());
    }
}
