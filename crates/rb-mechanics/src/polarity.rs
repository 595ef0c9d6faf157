//! Karma polarity, used to pick between the two boss introductions.

use rb_core::{Entry, GameState};
use serde::{Deserialize, Serialize};

/// Which way the player's karma leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Karma at or above zero.
    Benevolent,
    /// Negative karma.
    Hostile,
}

impl Polarity {
    /// The script entry point for the boss introduction of this polarity.
    pub fn boss_intro(self) -> Entry {
        match self {
            Self::Benevolent => Entry::BossIntroBenevolent,
            Self::Hostile => Entry::BossIntroHostile,
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Benevolent => write!(f, "benevolent"),
            Self::Hostile => write!(f, "hostile"),
        }
    }
}

/// Reduce the unclamped karma accumulator to a polarity.
pub fn karma_polar(state: &GameState) -> Polarity {
    if state.progress.karma >= 0 {
        Polarity::Benevolent
    } else {
        Polarity::Hostile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_benevolent() {
        let state = GameState::initial(0);
        assert_eq!(karma_polar(&state), Polarity::Benevolent);
    }

    #[test]
    fn uses_karma_not_rapport() {
        let mut state = GameState::initial(0);
        state.progress.rapport = 10;
        state.progress.karma = -1;
        assert_eq!(karma_polar(&state), Polarity::Hostile);
        assert_eq!(karma_polar(&state).boss_intro(), Entry::BossIntroHostile);
    }
}
