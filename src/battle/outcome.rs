//! Battle outcome.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// The result of a finished battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Side whose roster still stands.
    pub winner: Side,
    /// Name of the winning roster.
    pub winning_roster: String,
    /// Full rounds completed before the battle was decided. A win in the
    /// middle of round 1 reports 0.
    pub rounds_elapsed: u32,
}

impl Outcome {
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        self.winner == side
    }

    #[must_use]
    pub fn loser(&self) -> Side {
        self.winner.opponent()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) wins after {} round(s)",
            self.winning_roster, self.winner, self.rounds_elapsed
        )
    }
}
