//! Player and AI commands.

use std::fmt;
use std::str::FromStr;

use barrow_foundation::{Direction, Error};
use barrow_storage::Movement;

/// One action an actor takes on its turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Step one cell. Stepping into a hostile is a melee attack.
    Move(Direction),
    /// Pass the turn.
    Wait,
    /// Melee the first adjacent hostile, if any.
    Attack,
    /// End the run.
    Quit,
}

impl Command {
    /// The movement intent this command produces, if any.
    #[must_use]
    pub fn movement(self) -> Option<Movement> {
        match self {
            Self::Move(dir) => {
                let (dx, dy) = dir.delta();
                Some(Movement::new(dx, dy))
            }
            Self::Wait | Self::Attack | Self::Quit => None,
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.trim().to_ascii_lowercase().as_str() {
            "up" => Self::Move(Direction::North),
            "down" => Self::Move(Direction::South),
            "left" => Self::Move(Direction::West),
            "right" => Self::Move(Direction::East),
            "up_left" => Self::Move(Direction::NorthWest),
            "up_right" => Self::Move(Direction::NorthEast),
            "down_left" => Self::Move(Direction::SouthWest),
            "down_right" => Self::Move(Direction::SouthEast),
            "wait" => Self::Wait,
            "attack" => Self::Attack,
            "escape" | "quit" => Self::Quit,
            _ => return Err(Error::unknown_command(s)),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Move(Direction::North) => "up",
            Self::Move(Direction::South) => "down",
            Self::Move(Direction::West) => "left",
            Self::Move(Direction::East) => "right",
            Self::Move(Direction::NorthWest) => "up_left",
            Self::Move(Direction::NorthEast) => "up_right",
            Self::Move(Direction::SouthWest) => "down_left",
            Self::Move(Direction::SouthEast) => "down_right",
            Self::Wait => "wait",
            Self::Attack => "attack",
            Self::Quit => "quit",
        };
        f.write_str(name)
    }
}
