//! The fixed stage graph.
//!
//! Stages are totally ordered by game progress. Most transitions move
//! forward, but a few regress on purpose (bit desync, boss death, the
//! second loop reset), so ordering is used for guards like "at or after
//! `RoutingManual`" rather than as a monotonicity guarantee.

use serde::{Deserialize, Serialize};

/// A named node in the narrative/puzzle progression.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// The board is dark; only the breaker can be engaged.
    #[default]
    PowerOff,
    /// Bit-parity puzzle: match the target pattern.
    HardwareCalibration,
    /// Tune the oscillator until the signal locks.
    Resonance,
    /// Waiting for the handshake with the backend.
    Handshake,
    /// Keep the core temperature inside its band.
    ThermalRegulation,
    /// Clicker economy, driven by hand.
    RoutingManual,
    /// Clicker economy, driven by the auto-router.
    RoutingAuto,
    /// The router overflowed; a patch is required.
    SoftwareFault,
    /// The backend is patched and the system is open.
    Unlocked,
    /// The "ending" that precedes the memory wipe.
    Complete,
    /// The harder branch reached on the second loop or after boss death.
    HostileLockdown,
    /// The antagonist introduces the encounter.
    BossIntro,
    /// The multi-phase encounter itself.
    BossFight,
    /// The encounter is won, but not really.
    FalseVictory,
    /// The true escape. Terminal.
    Purified,
}

impl Stage {
    /// Every stage in progression order.
    pub const ALL: [Stage; 15] = [
        Stage::PowerOff,
        Stage::HardwareCalibration,
        Stage::Resonance,
        Stage::Handshake,
        Stage::ThermalRegulation,
        Stage::RoutingManual,
        Stage::RoutingAuto,
        Stage::SoftwareFault,
        Stage::Unlocked,
        Stage::Complete,
        Stage::HostileLockdown,
        Stage::BossIntro,
        Stage::BossFight,
        Stage::FalseVictory,
        Stage::Purified,
    ];

    /// The stage a first loop reset lands on.
    pub const LOOP_INTRO: Stage = Stage::PowerOff;

    /// The stable name used in save records and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Self::PowerOff => "POWER_OFF",
            Self::HardwareCalibration => "HARDWARE_CALIBRATION",
            Self::Resonance => "RESONANCE",
            Self::Handshake => "HANDSHAKE",
            Self::ThermalRegulation => "THERMAL_REGULATION",
            Self::RoutingManual => "ROUTING_MANUAL",
            Self::RoutingAuto => "ROUTING_AUTO",
            Self::SoftwareFault => "SOFTWARE_FAULT",
            Self::Unlocked => "UNLOCKED",
            Self::Complete => "COMPLETE",
            Self::HostileLockdown => "HOSTILE_LOCKDOWN",
            Self::BossIntro => "BOSS_INTRO",
            Self::BossFight => "BOSS_FIGHT",
            Self::FalseVictory => "FALSE_VICTORY",
            Self::Purified => "PURIFIED",
        }
    }

    /// Parse a stage from its name. Case-insensitive; `-` and spaces count as `_`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::ALL.into_iter().find(|stage| stage.name() == normalized)
    }

    /// Whether the stage ends the game.
    pub fn is_terminal(self) -> bool {
        self == Self::Purified
    }

    /// Whether the clicker economy accepts input in this stage.
    pub fn routes_data(self) -> bool {
        self >= Self::RoutingManual && !matches!(self, Self::SoftwareFault | Self::HostileLockdown)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_sorted() {
        let mut sorted = Stage::ALL;
        sorted.sort();
        assert_eq!(sorted, Stage::ALL);
    }

    #[test]
    fn names_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::parse(stage.name()), Some(stage));
        }
        assert_eq!(Stage::parse("boss-fight"), Some(Stage::BossFight));
        assert_eq!(Stage::parse("nowhere"), None);
    }

    #[test]
    fn serde_uses_stage_names() {
        let json = serde_json::to_string(&Stage::HostileLockdown).unwrap();
        assert_eq!(json, "\"HOSTILE_LOCKDOWN\"");
    }

    #[test]
    fn routing_window() {
        assert!(!Stage::Handshake.routes_data());
        assert!(Stage::RoutingManual.routes_data());
        assert!(!Stage::SoftwareFault.routes_data());
        assert!(Stage::Unlocked.routes_data());
        assert!(!Stage::HostileLockdown.routes_data());
    }
}
