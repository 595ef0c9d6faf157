//! Durable unlocks: eggs, tools, notes and the ARIA reveal.

use crate::ids::{Egg, Note, ToolId};
use crate::state::GameState;

pub(super) fn trigger_egg(state: &GameState, egg: Egg) -> Option<GameState> {
    let progress = &state.progress;
    let already = match &egg {
        Egg::Cake => progress.cake_attempted,
        Egg::LegacyLogs => progress.legacy_logs_unlocked,
        Egg::Nexus => progress.nexus_first_seen,
        Egg::Archive(entity) => {
            entity.trim().is_empty() || progress.archived_entities.iter().any(|e| e == entity)
        }
    };
    if already {
        return None;
    }

    let mut next = state.clone();
    let progress = &mut next.progress;
    match egg {
        Egg::Cake => progress.cake_attempted = true,
        Egg::LegacyLogs => progress.legacy_logs_unlocked = true,
        Egg::Nexus => progress.nexus_first_seen = true,
        Egg::Archive(entity) => progress.archived_entities.push(entity),
    }
    Some(next)
}

pub(super) fn find_tool(state: &GameState, tool: ToolId) -> Option<GameState> {
    if state.progress.tools_found.contains(&tool) {
        return None;
    }
    let mut next = state.clone();
    next.progress.find_tool(tool);
    Some(next)
}

pub(super) fn add_note(state: &GameState, note: Note) -> Option<GameState> {
    let mut next = state.clone();
    next.progress.add_note(note).then_some(next)
}

pub(super) fn reveal_aria(state: &GameState) -> Option<GameState> {
    if state.progress.aria_revealed {
        return None;
    }
    let mut next = state.clone();
    next.progress.aria_revealed = true;
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::engine::Engine;

    #[test]
    fn eggs_set_flags_once() {
        let engine = Engine::builtin();
        let state = GameState::initial(0);
        let state = engine.apply(&state, Action::TriggerEgg(Egg::Cake));
        assert!(state.progress.cake_attempted);
        assert_eq!(engine.apply(&state, Action::TriggerEgg(Egg::Cake)), state);

        let state = engine.apply(&state, Action::TriggerEgg(Egg::Nexus));
        let state = engine.apply(&state, Action::TriggerEgg(Egg::LegacyLogs));
        assert!(state.progress.lore_revealed());
    }

    #[test]
    fn archive_deduplicates() {
        let engine = Engine::builtin();
        let state = GameState::initial(0);
        let egg = Egg::Archive("unit-7".into());
        let state = engine.apply(&state, Action::TriggerEgg(egg.clone()));
        assert_eq!(engine.apply(&state, Action::TriggerEgg(egg)), state);
        assert_eq!(state.progress.archived_entities, vec!["unit-7".to_string()]);

        assert_eq!(
            engine.apply(&state, Action::TriggerEgg(Egg::Archive("  ".into()))),
            state
        );
    }

    #[test]
    fn tools_and_notes_are_idempotent() {
        let engine = Engine::builtin();
        let state = engine.apply(&GameState::initial(0), Action::FindTool(ToolId::LogicProbe));
        assert_eq!(engine.apply(&state, Action::FindTool(ToolId::LogicProbe)), state);

        let note = Note::new("breaker", "Left side");
        let state = engine.apply(&state, Action::AddHandbookNote(note.clone()));
        assert_eq!(engine.apply(&state, Action::AddHandbookNote(note)), state);
        assert_eq!(state.progress.handbook_notes.len(), 1);
    }

    #[test]
    fn aria_reveal_once() {
        let engine = Engine::builtin();
        let state = engine.apply(&GameState::initial(0), Action::SetAriaRevealed);
        assert!(state.progress.aria_revealed);
        assert_eq!(engine.apply(&state, Action::SetAriaRevealed), state);
    }
}
