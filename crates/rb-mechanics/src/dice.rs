//! The check die.

use rand::Rng;
use rand::rngs::StdRng;

/// A die type. Skill checks only ever roll a d20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Die {
    /// Twenty-sided die.
    D20,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D20 => 20,
        }
    }

    /// Roll the die once: a value in `1..=sides`.
    pub fn roll(self, rng: &mut StdRng) -> u32 {
        rng.random_range(1..=self.sides())
    }
}
