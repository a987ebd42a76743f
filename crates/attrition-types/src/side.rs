//! Party identifiers.
//!
//! A match always has exactly two parties. `A` submits its bid through the
//! caller; `B` is the side whose bid may come from the opponent oracle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two parties in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Both sides, in canonical order.
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    /// The other party.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Which parties can no longer fund maintenance.
///
/// Input to the walkover cascade: a single bankrupt party hands the
/// remaining rounds to its opponent, `Both` ends the match outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bankruptcy {
    Party(Side),
    Both,
}

impl Bankruptcy {
    /// The party that keeps playing, if any.
    #[must_use]
    pub fn solvent(self) -> Option<Side> {
        match self {
            Self::Party(side) => Some(side.opponent()),
            Self::Both => None,
        }
    }
}
