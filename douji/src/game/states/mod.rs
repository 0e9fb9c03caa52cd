//! Game state definitions for the douji FSM.
//!
//! Each state represents a specific phase of a single game.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::entities::SeatIndex;

/// Dealt nothing yet and collected no antes.
#[derive(Debug, Default)]
pub struct Ready {}

/// Antes collected and the opening cards dealt; rounds are being played.
#[derive(Debug, Default)]
pub struct InProcess {
    pub round: u8,
}

/// The pot was awarded.
#[derive(Debug)]
pub struct Over {
    pub winner: SeatIndex,
    pub reason: WinReason,
}

/// The best final scores tied, so the pot stays for another game.
#[derive(Debug)]
pub struct Bombing {
    /// Seats sharing the best final score, in ranking order.
    pub tied: Vec<SeatIndex>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum WinReason {
    /// Everyone else folded.
    SoleSurvivor,
    /// The only survivor holding a four-of-a-kind.
    FourOfAKind,
    /// Strictly highest final score.
    HighestScore,
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::SoleSurvivor => "last player standing",
            Self::FourOfAKind => "four of a kind",
            Self::HighestScore => "highest score",
        };
        write!(f, "{repr}")
    }
}
