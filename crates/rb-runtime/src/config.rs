//! Session configuration.

use rb_save::{DEFAULT_MANUAL_SLOTS, SAVE_VERSION};

use crate::processor::DEFAULT_REVEAL_DELAY_MS;

/// Configuration for a play session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seed for the first game and the session RNG.
    pub seed: u64,
    /// Typing delay before each message lands.
    pub reveal_delay_ms: u64,
    /// Number of manual save slots.
    pub manual_slots: u8,
    /// Write the auto slot on every checkpoint.
    pub autosave: bool,
    /// Save version written and accepted.
    pub save_version: String,
    /// Interval of the auto-router tick.
    pub auto_tick_ms: u64,
    /// Interval of boss pressure during the fight.
    pub boss_pressure_ms: u64,
    /// Difficulty of the pressure check.
    pub boss_pressure_dc: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            manual_slots: DEFAULT_MANUAL_SLOTS,
            autosave: true,
            save_version: SAVE_VERSION.to_string(),
            auto_tick_ms: 500,
            boss_pressure_ms: 4000,
            boss_pressure_dc: 10,
        }
    }
}

impl SessionConfig {
    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the typing delay.
    pub fn with_reveal_delay(mut self, ms: u64) -> Self {
        self.reveal_delay_ms = ms;
        self
    }

    /// Set the number of manual slots.
    pub fn with_manual_slots(mut self, count: u8) -> Self {
        self.manual_slots = count;
        self
    }

    /// Enable or disable autosave.
    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    /// Override the save version.
    pub fn with_save_version(mut self, version: impl Into<String>) -> Self {
        self.save_version = version.into();
        self
    }

    /// Set the auto-router interval.
    pub fn with_auto_tick(mut self, ms: u64) -> Self {
        self.auto_tick_ms = ms.max(1);
        self
    }

    /// Set the boss pressure interval and difficulty.
    pub fn with_boss_pressure(mut self, ms: u64, dc: i32) -> Self {
        self.boss_pressure_ms = ms.max(1);
        self.boss_pressure_dc = dc;
        self
    }
}
