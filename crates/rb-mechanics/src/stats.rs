//! Stats derived from durable progress.
//!
//! Every value here is a pure function of the state, so the modifiers a
//! player sees only ever change when their progress does.

use rb_core::GameState;
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Upper bound of the fate bonus.
pub const MAX_FATE: i32 = 3;

/// One of the four check stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// How much the antagonist likes the player.
    Charisma,
    /// How well equipped the player is.
    Equipment,
    /// How many times the player has been around.
    Experience,
    /// How often the player has chosen kindness.
    Intuition,
}

impl StatKind {
    /// Every stat.
    pub const ALL: [StatKind; 4] = [
        StatKind::Charisma,
        StatKind::Equipment,
        StatKind::Experience,
        StatKind::Intuition,
    ];

    /// The snake_case name of the stat.
    pub fn name(self) -> &'static str {
        match self {
            Self::Charisma => "charisma",
            Self::Equipment => "equipment",
            Self::Experience => "experience",
            Self::Intuition => "intuition",
        }
    }

    /// Parse a stat by name.
    pub fn parse(s: &str) -> MechResult<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| MechError::UnknownStat(s.to_string()))
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Check modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Half the rapport, in `-3..=5`.
    pub charisma: i32,
    /// One per tool found.
    pub equipment: i32,
    /// Loops survived plus boss encounters (at most three).
    pub experience: i32,
    /// Share of positive choices, scaled to `0..=4`.
    pub intuition: i32,
}

impl Stats {
    /// The modifier for a stat.
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Charisma => self.charisma,
            StatKind::Equipment => self.equipment,
            StatKind::Experience => self.experience,
            StatKind::Intuition => self.intuition,
        }
    }
}

/// Derive the stats of a state.
pub fn build_stats(state: &GameState) -> Stats {
    let progress = &state.progress;
    Stats {
        charisma: (progress.rapport / 2).clamp(-3, 5),
        equipment: progress.tools_found.len() as i32,
        experience: state.loop_count as i32 + progress.apex_encounters.min(3) as i32,
        intuition: (progress.positive_choice_fraction() * 4.0).round() as i32,
    }
}

/// Bonus in `0..=3` that rewards durable progress independent of the dice.
pub fn fate(state: &GameState) -> i32 {
    let progress = &state.progress;
    let earned = [
        state.loop_count >= 1,
        progress.rapport >= 7,
        progress.lore_revealed(),
        progress.tools_found.len() >= 4,
    ];
    (earned.iter().filter(|&&e| e).count() as i32).min(MAX_FATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rb_core::{ChoiceRecord, ToolId};

    #[test]
    fn fresh_state_has_flat_stats() {
        let state = GameState::initial(0);
        assert_eq!(build_stats(&state), Stats::default());
        assert_eq!(fate(&state), 0);
    }

    #[test]
    fn stats_follow_progress() {
        let mut state = GameState::initial(0);
        state.loop_count = 1;
        state.progress.rapport = 9;
        state.progress.apex_encounters = 5;
        state.progress.tools_found.extend([ToolId::Multimeter, ToolId::Debugger]);
        for (id, boost) in [("a", 1), ("b", 2), ("c", -1), ("d", 1)] {
            state.progress.user_choices.push(ChoiceRecord {
                choice_id: id.into(),
                rapport_boost: boost,
            });
        }
        let stats = build_stats(&state);
        assert_eq!(stats.charisma, 4);
        assert_eq!(stats.equipment, 2);
        assert_eq!(stats.experience, 4);
        assert_eq!(stats.intuition, 3);
    }

    #[test]
    fn charisma_is_clamped() {
        let mut state = GameState::initial(0);
        state.progress.rapport = -40;
        assert_eq!(build_stats(&state).charisma, -3);
    }

    #[test]
    fn fate_caps_at_three() {
        let mut state = GameState::initial(0);
        state.loop_count = 2;
        state.progress.rapport = 10;
        state.progress.aria_revealed = true;
        state.progress.tools_found.extend(ToolId::ALL);
        assert_eq!(fate(&state), MAX_FATE);
    }

    #[test]
    fn parse_stat() {
        assert_eq!(StatKind::parse("Intuition").unwrap(), StatKind::Intuition);
        assert!(matches!(
            StatKind::parse("luck"),
            Err(MechError::UnknownStat(_))
        ));
    }
}
