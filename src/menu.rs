//! The choices offered at each menu, parsed from a line of user input.

use crate::error::GameError;
use std::str::FromStr;

pub const MAIN_MENU: &str =
    "Do you want to start a new game or continue an existing game? (1 for New, 2 for Existing, 3 to Quit): ";
pub const ENTRY_MENU: &str = "Choose an option: 1. Enter Names manually 2. Import from CSV: ";
pub const DASHBOARD_MENU: &str =
    "Choose an option:\n 1. Leaderboard \n 2. Record a kill \n 3. Display Game Tree \n 4. End Game: \n";

/// Selection at the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainChoice {
    NewGame,
    ContinueGame,
    Quit,
}

/// How the roster of a new game is entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryMethod {
    Manual,
    Import,
}

/// Selection at the game dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardChoice {
    Leaderboard,
    RecordKill,
    GameTree,
    EndGame,
}

impl FromStr for MainChoice {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MainChoice::NewGame),
            "2" => Ok(MainChoice::ContinueGame),
            "3" => Ok(MainChoice::Quit),
            _ => Err(GameError::InvalidChoice(
                "\"1\" for New, \"2\" for Existing or \"3\" to Quit",
            )),
        }
    }
}

impl FromStr for EntryMethod {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(EntryMethod::Manual),
            "2" => Ok(EntryMethod::Import),
            _ => Err(GameError::InvalidChoice("1 or 2")),
        }
    }
}

impl FromStr for DashboardChoice {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(DashboardChoice::Leaderboard),
            "2" => Ok(DashboardChoice::RecordKill),
            "3" => Ok(DashboardChoice::GameTree),
            "4" => Ok(DashboardChoice::EndGame),
            _ => Err(GameError::InvalidChoice("1, 2, 3, or 4")),
        }
    }
}

/// Returns true if `line` ends manual player entry.
pub fn is_done(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("done")
}
