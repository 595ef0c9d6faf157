//! The single authoritative state holder.

use rb_core::{Action, Engine, GameState, Stage};

use crate::bus::{EventSink, GameEvent};

/// Owns the engine and the current state. Every mutation goes through
/// [`GameStore::dispatch`], which also publishes the surface-level events
/// derived from the before/after pair.
#[derive(Debug, Clone)]
pub struct GameStore {
    engine: Engine,
    state: GameState,
    transitions: Vec<(Stage, Stage)>,
    queue_epoch: u64,
}

impl GameStore {
    /// Wrap an engine and a starting state.
    pub fn new(engine: Engine, state: GameState) -> Self {
        Self {
            engine,
            state,
            transitions: Vec::new(),
            queue_epoch: 0,
        }
    }

    /// The current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Bumped whenever a dispatch changes the queue other than by appending.
    pub fn queue_epoch(&self) -> u64 {
        self.queue_epoch
    }

    /// Apply one action. Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action, sink: &dyn EventSink) -> bool {
        let next = self.engine.apply(&self.state, action);
        if next == self.state {
            return false;
        }
        let prev = std::mem::replace(&mut self.state, next);
        let state = &self.state;
        let appended = state.chat_queue.len() >= prev.chat_queue.len()
            && prev.chat_queue.iter().zip(&state.chat_queue).all(|(a, b)| a == b);
        if !appended {
            self.queue_epoch = self.queue_epoch.wrapping_add(1);
        }
        if prev.stage != state.stage {
            self.transitions.push((prev.stage, state.stage));
            sink.publish(GameEvent::StageChanged {
                from: prev.stage,
                to: state.stage,
            });
        }
        if prev.chat_open && !state.chat_open {
            sink.publish(GameEvent::ChatClosed);
        }
        if !prev.sidebar_open && state.sidebar_open {
            sink.publish(GameEvent::SidebarOpened);
        }
        true
    }

    /// Stage moves since the last call, oldest first.
    pub fn take_transitions(&mut self) -> Vec<(Stage, Stage)> {
        std::mem::take(&mut self.transitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::RecordingSink;
    use rb_core::DialogueStep;

    #[test]
    fn queue_epoch_moves_on_replacement_only() {
        let mut state = GameState::initial(1);
        state.chat_queue = vec![DialogueStep::riley("a"), DialogueStep::riley("b")].into();
        let mut store = GameStore::new(Engine::builtin(), state);
        let sink = RecordingSink::new();

        store.dispatch(Action::EnqueueChat(vec![DialogueStep::riley("c")]), &sink);
        assert_eq!(store.queue_epoch(), 0);
        store.dispatch(Action::OpenSidebar, &sink);
        assert_eq!(store.queue_epoch(), 0);
        store.dispatch(Action::PopChatQueue, &sink);
        assert_eq!(store.queue_epoch(), 1);
    }

    #[test]
    fn records_stage_moves_and_surface_events() {
        let engine = Engine::builtin();
        let state = engine.new_game_state(3);
        let mut store = GameStore::new(engine, state);
        let sink = RecordingSink::new();

        assert!(store.dispatch(Action::EngagePower, &sink));
        assert!(store.dispatch(Action::CloseChat, &sink));
        assert!(!store.dispatch(Action::CloseChat, &sink));

        assert_eq!(
            store.take_transitions(),
            vec![(Stage::PowerOff, Stage::HardwareCalibration)]
        );
        assert!(store.take_transitions().is_empty());
        assert_eq!(
            sink.events(),
            vec![
                GameEvent::StageChanged {
                    from: Stage::PowerOff,
                    to: Stage::HardwareCalibration,
                },
                GameEvent::ChatClosed,
            ]
        );
    }
}
