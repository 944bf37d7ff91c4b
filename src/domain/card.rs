use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Тип дисциплинарной карточки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Yellow,
    Red,
}

impl CardType {
    pub const fn label(self) -> &'static str {
        match self {
            CardType::Yellow => "YELLOW",
            CardType::Red => "RED",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Парсинг строки вида "yellow", "RED", "y", "r".
impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yellow" | "y" => Ok(CardType::Yellow),
            "red" | "r" => Ok(CardType::Red),
            other => Err(format!("Invalid card type: {other}")),
        }
    }
}
