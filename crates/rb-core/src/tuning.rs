//! Gameplay constants used by the transition engine.

use serde::{Deserialize, Serialize};

/// Number of bit lines on the calibration board.
pub const BIT_COUNT: usize = 8;

/// Gameplay constants. The defaults are the shipped balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Cycles at which manual routing switches to the auto-router.
    pub routing_auto_threshold: f64,
    /// Cycles past which the unpatched auto-router faults.
    pub fault_ceiling: f64,
    /// Auto-rate the router starts with when it takes over.
    pub initial_auto_rate: f64,
    /// Token a patch must contain (after stripping whitespace).
    pub patch_token: String,
    /// Auto-rate after a successful patch.
    pub patched_auto_rate: f64,
    /// Base price of a click-power upgrade, multiplied by current click power.
    pub click_upgrade_cost: f64,
    /// Base price of an auto-rate upgrade, multiplied by the next rate.
    pub auto_upgrade_cost: f64,
    /// Upper clamp for rapport.
    pub rapport_max: i32,
    /// Player hit points in the boss encounter.
    pub boss_max_hp: i32,
    /// Node order for boss phase 2.
    pub node_order: Vec<u8>,
    /// Inclusive valve window for boss phase 3.
    pub valve_window: (u8, u8),
    /// Length of the simon sequence in boss phase 3.
    pub simon_length: usize,
    /// Number of distinct simon symbols.
    pub simon_symbols: u8,
    /// Code that skips the encounter once ARIA is revealed.
    pub aria_code: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            routing_auto_threshold: 15.0,
            fault_ceiling: 60.0,
            initial_auto_rate: 1.0,
            patch_token: "1024".to_string(),
            patched_auto_rate: 4.0,
            click_upgrade_cost: 10.0,
            auto_upgrade_cost: 15.0,
            rapport_max: 10,
            boss_max_hp: 5,
            node_order: vec![3, 1, 4, 0, 2],
            valve_window: (40, 60),
            simon_length: 4,
            simon_symbols: 4,
            aria_code: "ARIA-7".to_string(),
        }
    }
}

impl Tuning {
    /// Set the player's boss-fight hit points (at least 1).
    pub fn with_boss_max_hp(mut self, hp: i32) -> Self {
        self.boss_max_hp = hp.max(1);
        self
    }

    /// Set the patch token.
    pub fn with_patch_token(mut self, token: impl Into<String>) -> Self {
        self.patch_token = token.into();
        self
    }

    /// Set the auto-router fault ceiling.
    pub fn with_fault_ceiling(mut self, ceiling: f64) -> Self {
        self.fault_ceiling = ceiling;
        self
    }

    /// Whether a valve setting is inside the phase-3 window.
    pub fn valve_in_window(&self, percent: u8) -> bool {
        (self.valve_window.0..=self.valve_window.1).contains(&percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = Tuning::default();
        assert_eq!(t.routing_auto_threshold, 15.0);
        assert_eq!(t.fault_ceiling, 60.0);
        assert_eq!(t.boss_max_hp, 5);
        assert_eq!(t.rapport_max, 10);
    }

    #[test]
    fn hp_floor() {
        assert_eq!(Tuning::default().with_boss_max_hp(0).boss_max_hp, 1);
    }

    #[test]
    fn valve_window() {
        let t = Tuning::default();
        assert!(!t.valve_in_window(39));
        assert!(t.valve_in_window(40));
        assert!(t.valve_in_window(60));
        assert!(!t.valve_in_window(61));
    }
}
