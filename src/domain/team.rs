// src/domain/team.rs

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Сторона матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    /// Соперник этой команды.
    pub const fn opposite(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Team::Home => "HOME",
            Team::Away => "AWAY",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "h" => Ok(Team::Home),
            "away" | "a" => Ok(Team::Away),
            other => Err(format!("Invalid team: {other}")),
        }
    }
}

/// Цвет формы команды. Чисто косметическая настройка,
/// её можно менять в любой момент матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamColor {
    White,
    Black,
    Red,
    Blue,
    SkyBlue,
    Green,
    Yellow,
    Orange,
    Purple,
}

impl TeamColor {
    pub const fn label(self) -> &'static str {
        match self {
            TeamColor::White => "white",
            TeamColor::Black => "black",
            TeamColor::Red => "red",
            TeamColor::Blue => "blue",
            TeamColor::SkyBlue => "sky_blue",
            TeamColor::Green => "green",
            TeamColor::Yellow => "yellow",
            TeamColor::Orange => "orange",
            TeamColor::Purple => "purple",
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TeamColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let color = match normalized.as_str() {
            "white" => TeamColor::White,
            "black" => TeamColor::Black,
            "red" => TeamColor::Red,
            "blue" => TeamColor::Blue,
            "sky_blue" | "skyblue" => TeamColor::SkyBlue,
            "green" => TeamColor::Green,
            "yellow" => TeamColor::Yellow,
            "orange" => TeamColor::Orange,
            "purple" => TeamColor::Purple,
            _ => return Err(format!("Invalid team color: {s}")),
        };
        Ok(color)
    }
}
