//! Decides when the auto slot should be rewritten.

use rb_core::{GameState, Stage};

/// Watches the fields that mark a durable checkpoint: stage, rapport and
/// loop count. Anything else changing does not trigger an autosave.
#[derive(Debug, Clone, Default)]
pub struct AutosaveWatch {
    last: Option<(Stage, i32, u32)>,
}

impl AutosaveWatch {
    /// A watch with no baseline. The first observation always fires.
    pub fn new() -> Self {
        Self::default()
    }

    /// A watch whose baseline is `state`.
    pub fn primed(state: &GameState) -> Self {
        Self {
            last: Some(Self::key(state)),
        }
    }

    /// Reset the baseline without firing.
    pub fn prime(&mut self, state: &GameState) {
        self.last = Some(Self::key(state));
    }

    /// Record `state`. Returns true when a checkpoint field moved.
    pub fn observe(&mut self, state: &GameState) -> bool {
        let key = Self::key(state);
        if self.last == Some(key) {
            return false;
        }
        self.last = Some(key);
        true
    }

    fn key(state: &GameState) -> (Stage, i32, u32) {
        (state.stage, state.progress.rapport, state.loop_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_checkpoint_fields_only() {
        let mut state = GameState::initial(1);
        let mut watch = AutosaveWatch::primed(&state);
        assert!(!watch.observe(&state));

        state.data_cycles = 99.0;
        state.bits[0] = !state.bits[0];
        assert!(!watch.observe(&state));

        state.progress.rapport += 1;
        assert!(watch.observe(&state));
        assert!(!watch.observe(&state));

        state.stage = Stage::HardwareCalibration;
        assert!(watch.observe(&state));

        state.loop_count = 1;
        assert!(watch.observe(&state));
    }

    #[test]
    fn unprimed_fires_once() {
        let state = GameState::initial(1);
        let mut watch = AutosaveWatch::new();
        assert!(watch.observe(&state));
        assert!(!watch.observe(&state));
    }
}
