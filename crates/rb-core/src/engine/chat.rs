//! Dialogue queue plumbing and UI surface flags.

use std::collections::VecDeque;

use crate::dialogue::{ChatMessage, DialogueStep, Sender};
use crate::ids::{AppId, ChatMode};
use crate::script::Script;
use crate::state::{ChoiceRecord, GameState};
use crate::tuning::Tuning;

pub(super) fn set_active_app(state: &GameState, app: Option<AppId>) -> Option<GameState> {
    if state.active_app == app {
        return None;
    }
    let mut next = state.clone();
    next.active_app = app;
    Some(next)
}

pub(super) fn set_mode(state: &GameState, mode: ChatMode) -> Option<GameState> {
    if state.chat_mode == mode {
        return None;
    }
    let mut next = state.clone();
    next.chat_mode = mode;
    Some(next)
}

/// Append steps. The chat surface opens unless the game is over.
pub(super) fn enqueue(state: &GameState, steps: Vec<DialogueStep>) -> Option<GameState> {
    if steps.is_empty() {
        return None;
    }
    let mut next = state.clone();
    next.chat_queue.extend(steps);
    if !next.stage.is_terminal() {
        next.chat_open = true;
    }
    Some(next)
}

pub(super) fn pop(state: &GameState) -> Option<GameState> {
    if state.chat_queue.is_empty() {
        return None;
    }
    let mut next = state.clone();
    next.chat_queue.pop_front();
    Some(next)
}

pub(super) fn reveal_message(state: &GameState) -> Option<GameState> {
    let Some(DialogueStep::Message { .. }) = state.chat_queue.front() else {
        return None;
    };
    let mut next = state.clone();
    if let Some(DialogueStep::Message { sender, text }) = next.chat_queue.pop_front() {
        next.chat_messages.push(ChatMessage { sender, text });
    }
    Some(next)
}

pub(super) fn publish_options(state: &GameState) -> Option<GameState> {
    let Some(DialogueStep::Options { .. }) = state.chat_queue.front() else {
        return None;
    };
    let mut next = state.clone();
    if let Some(DialogueStep::Options { choices }) = next.chat_queue.pop_front() {
        next.chat_options = choices;
    }
    next.branch_tail = next.chat_queue.len();
    Some(next)
}

/// Resolve a published choice. Its branch replaces the steps that were queued
/// behind the option set; anything enqueued after publishing is kept behind
/// the branch.
pub(super) fn select_option(
    state: &GameState,
    choice_id: &str,
    script: &Script,
    tuning: &Tuning,
) -> Option<GameState> {
    let choice = state
        .chat_options
        .iter()
        .find(|c| c.choice_id == choice_id)?;
    if !choice.unlocked_at(state.progress.rapport) {
        return None;
    }

    let boost = choice.rapport_boost.unwrap_or(0);
    let mut next = state.clone();
    next.progress.rapport = next
        .progress
        .rapport
        .saturating_add(boost)
        .min(tuning.rapport_max);
    next.progress.karma = next.progress.karma.saturating_add(boost);
    next.progress.user_choices.push(ChoiceRecord {
        choice_id: choice.choice_id.clone(),
        rapport_boost: boost,
    });
    next.chat_messages.push(ChatMessage {
        sender: Sender::Player,
        text: choice.text.clone(),
    });
    let stale = state.branch_tail.min(next.chat_queue.len());
    let mut queue: VecDeque<DialogueStep> = script.branch(&choice.next_node).into();
    queue.extend(next.chat_queue.drain(stale..));
    next.chat_queue = queue;
    next.chat_options.clear();
    next.branch_tail = 0;
    Some(next)
}

pub(super) fn close(state: &GameState) -> Option<GameState> {
    if !state.chat_open {
        return None;
    }
    let mut next = state.clone();
    next.chat_open = false;
    Some(next)
}

pub(super) fn open_sidebar(state: &GameState) -> Option<GameState> {
    if state.sidebar_open {
        return None;
    }
    let mut next = state.clone();
    next.sidebar_open = true;
    Some(next)
}

#[cfg(test)]
mod tests {
    use crate::action::Action;
    use crate::dialogue::{ActionStepKind, ChatChoice, DialogueStep, Sender};
    use crate::engine::Engine;
    use crate::script::Script;
    use crate::stage::Stage;
    use crate::state::GameState;
    use crate::tuning::Tuning;

    fn engine() -> Engine {
        let script = Script::builtin()
            .with_node("c", vec![DialogueStep::riley("C"), DialogueStep::riley("D")])
            .with_node("gated", vec![DialogueStep::riley("G")]);
        Engine::new(script, Tuning::default())
    }

    fn with_options(choices: Vec<ChatChoice>) -> GameState {
        let mut state = GameState::initial(0);
        state.chat_queue.push_back(DialogueStep::options(choices));
        state.chat_queue.push_back(DialogueStep::riley("B"));
        state
    }

    #[test]
    fn enqueue_appends_and_opens_chat() {
        let engine = engine();
        let mut state = GameState::initial(0);
        state.chat_queue.push_back(DialogueStep::riley("first"));
        let next = engine.apply(&state, Action::EnqueueChat(vec![DialogueStep::riley("second")]));
        assert_eq!(next.chat_queue.len(), 2);
        assert_eq!(next.chat_queue[0], DialogueStep::riley("first"));
        assert!(next.chat_open);
    }

    #[test]
    fn enqueue_keeps_chat_closed_after_escape() {
        let engine = engine();
        let mut state = GameState::initial(0);
        state.stage = Stage::Purified;
        let next = engine.apply(&state, Action::EnqueueChat(vec![DialogueStep::riley("x")]));
        assert!(!next.chat_open);
        assert_eq!(next.chat_queue.len(), 1);
    }

    #[test]
    fn reveal_requires_message_head() {
        let engine = engine();
        let state = with_options(vec![ChatChoice::new("x", "X", "c")]);
        assert_eq!(engine.apply(&state, Action::RevealChatMessage), state);

        let mut state = GameState::initial(0);
        state.chat_queue.push_back(DialogueStep::riley("hi"));
        let next = engine.apply(&state, Action::RevealChatMessage);
        assert!(next.chat_queue.is_empty());
        assert_eq!(next.chat_messages[0].text, "hi");
        assert_eq!(next.chat_messages[0].sender, Sender::Riley);
    }

    #[test]
    fn publish_then_select_replaces_queue() {
        let engine = engine();
        let state = with_options(vec![ChatChoice::new("x", "Pick X", "c").with_boost(2)]);
        let state = engine.apply(&state, Action::PublishChatOptions);
        assert_eq!(state.chat_options.len(), 1);
        assert_eq!(state.chat_queue.len(), 1);

        let state = engine.apply(&state, Action::SelectChatOption("x".into()));
        assert!(state.chat_options.is_empty());
        assert_eq!(state.chat_queue.len(), 2);
        assert_eq!(state.chat_queue[0], DialogueStep::riley("C"));
        assert_eq!(state.progress.rapport, 2);
        assert_eq!(state.progress.karma, 2);
        assert_eq!(state.progress.user_choices[0].choice_id, "x");
        let last = state.chat_messages.last().unwrap();
        assert_eq!(last.sender, Sender::Player);
        assert_eq!(last.text, "Pick X");
    }

    #[test]
    fn select_without_published_options_is_noop() {
        let engine = engine();
        let state = with_options(vec![ChatChoice::new("x", "X", "c")]);
        assert_eq!(engine.apply(&state, Action::SelectChatOption("x".into())), state);
    }

    #[test]
    fn select_unknown_or_gated_is_noop() {
        let engine = engine();
        let state = engine.apply(
            &with_options(vec![ChatChoice::new("g", "Gated", "gated").requires(5)]),
            Action::PublishChatOptions,
        );
        assert_eq!(engine.apply(&state, Action::SelectChatOption("nope".into())), state);
        assert_eq!(engine.apply(&state, Action::SelectChatOption("g".into())), state);

        let mut trusted = state.clone();
        trusted.progress.rapport = 5;
        let next = engine.apply(&trusted, Action::SelectChatOption("g".into()));
        assert_eq!(next.chat_queue[0], DialogueStep::riley("G"));
    }

    #[test]
    fn rapport_clamps_but_karma_does_not() {
        let engine = engine();
        let mut state = engine.apply(
            &with_options(vec![ChatChoice::new("x", "X", "c").with_boost(4)]),
            Action::PublishChatOptions,
        );
        state.progress.rapport = 9;
        state.progress.karma = 9;
        let next = engine.apply(&state, Action::SelectChatOption("x".into()));
        assert_eq!(next.progress.rapport, 10);
        assert_eq!(next.progress.karma, 13);
    }

    #[test]
    fn extreme_boosts_saturate() {
        let engine = engine();
        let mut state = engine.apply(
            &with_options(vec![ChatChoice::new("x", "X", "c").with_boost(i32::MAX)]),
            Action::PublishChatOptions,
        );
        state.progress.karma = 1;
        let next = engine.apply(&state, Action::SelectChatOption("x".into()));
        assert_eq!(next.progress.rapport, 10);
        assert_eq!(next.progress.karma, i32::MAX);

        let mut state = engine.apply(
            &with_options(vec![ChatChoice::new("y", "Y", "c").with_boost(i32::MIN)]),
            Action::PublishChatOptions,
        );
        state.progress.rapport = -1;
        state.progress.karma = -1;
        let next = engine.apply(&state, Action::SelectChatOption("y".into()));
        assert_eq!(next.progress.rapport, i32::MIN);
        assert_eq!(next.progress.karma, i32::MIN);
    }

    #[test]
    fn select_keeps_steps_enqueued_after_publish() {
        let engine = engine();
        let state = engine.apply(
            &with_options(vec![ChatChoice::new("x", "X", "c")]),
            Action::PublishChatOptions,
        );
        assert_eq!(state.branch_tail, 1);
        let state = engine.apply(
            &state,
            Action::EnqueueChat(vec![
                DialogueStep::riley("late"),
                DialogueStep::action(ActionStepKind::GaslightReset),
            ]),
        );

        let next = engine.apply(&state, Action::SelectChatOption("x".into()));
        assert_eq!(
            Vec::from(next.chat_queue.clone()),
            vec![
                DialogueStep::riley("C"),
                DialogueStep::riley("D"),
                DialogueStep::riley("late"),
                DialogueStep::action(ActionStepKind::GaslightReset),
            ]
        );
        assert_eq!(next.branch_tail, 0);
    }

    #[test]
    fn missing_branch_stalls() {
        let engine = engine();
        let state = engine.apply(
            &with_options(vec![ChatChoice::new("x", "X", "void")]),
            Action::PublishChatOptions,
        );
        let next = engine.apply(&state, Action::SelectChatOption("x".into()));
        assert!(next.chat_queue.is_empty());
        assert!(next.chat_options.is_empty());
    }

    #[test]
    fn surface_flags() {
        let engine = engine();
        let mut state = GameState::initial(0);
        assert_eq!(engine.apply(&state, Action::CloseChat), state);
        state.chat_open = true;
        assert!(!engine.apply(&state, Action::CloseChat).chat_open);

        let opened = engine.apply(&state, Action::OpenSidebar);
        assert!(opened.sidebar_open);
        assert_eq!(engine.apply(&opened, Action::OpenSidebar), opened);
    }

    #[test]
    fn pop_drops_any_head() {
        let engine = engine();
        let mut state = GameState::initial(0);
        assert_eq!(engine.apply(&state, Action::PopChatQueue), state);
        state
            .chat_queue
            .push_back(DialogueStep::action(ActionStepKind::CloseChat));
        assert!(engine.apply(&state, Action::PopChatQueue).chat_queue.is_empty());
    }
}
