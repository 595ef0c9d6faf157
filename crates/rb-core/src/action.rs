//! The closed action vocabulary accepted by the transition engine.
//!
//! Actions travel as `{type, payload?}` on the wire. Inside the crate the
//! set is a closed enum, so a new action without a handler fails to build;
//! at the wire boundary an unknown `type` simply does not parse and is
//! absorbed as a no-op by [`crate::Engine::apply_json`].

use serde::{Deserialize, Serialize};

use crate::dialogue::DialogueStep;
use crate::ids::{AppId, ChatMode, Egg, Note, ToolId, UpgradeKind};
use crate::stage::Stage;
use crate::state::GameState;

/// Every legal mutation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    // Power and calibration
    /// Engage the breaker.
    EngagePower,
    /// Toggle one bit line.
    FlipBit(usize),
    /// Move the oscillator.
    SetResonance(u32),
    /// The collaborator reports a frequency lock.
    AchieveResonance,
    /// Record a calibrated frequency.
    CalibrateFreq(u32),
    /// Finish the backend handshake.
    CompleteHandshake,
    /// Finish the thermal mini-game.
    CompleteThermalTask,
    /// Force a stage.
    SetStage(Stage),

    // Clicker economy
    /// Route one batch of data by hand.
    IngestData,
    /// Set the auto-router rate.
    SetAutoRate(f64),
    /// Buy an upgrade.
    BuyUpgrade(UpgradeKind),
    /// Periodic auto-router tick.
    AutoTick,
    /// Submit a backend patch.
    ApplyPatch(String),
    /// Reach the pre-wipe ending.
    CompleteGame,

    // Surfaces and dialogue
    /// Focus an app, or none.
    SetActiveApp(Option<AppId>),
    /// Append steps to the dialogue queue.
    EnqueueChat(Vec<DialogueStep>),
    /// Drop the queue head.
    PopChatQueue,
    /// Commit the head message to the transcript.
    RevealChatMessage,
    /// Publish the head option set.
    PublishChatOptions,
    /// Pick a published option by choice id.
    SelectChatOption(String),
    /// Switch the chat line source.
    SetChatMode(ChatMode),
    /// Close the chat surface.
    CloseChat,
    /// Open the handbook sidebar.
    OpenSidebar,
    /// Trigger a hidden interaction.
    TriggerEgg(Egg),
    /// Record a tool.
    FindTool(ToolId),
    /// Append a handbook note.
    AddHandbookNote(Note),
    /// Flag the ARIA reveal.
    SetAriaRevealed,

    // Reset family
    /// The in-fiction memory wipe.
    DoGaslightReset,
    /// The legitimate win.
    TrueEscape,
    /// Discard everything and start over.
    NewGame {
        /// Seed for the fresh state.
        seed: u64,
    },
    /// Replace the state wholesale with a snapshot.
    LoadState(Box<GameState>),

    // Boss encounter
    /// Start the boss introduction.
    EnterBossIntro,
    /// Start the fight.
    EnterBossFight,
    /// Advance to the next phase.
    BossPhaseComplete,
    /// Damage the player.
    PlayerHit(i32),
    /// Heal the player.
    HealPlayer(i32),
    /// Phase 1: pull a hose.
    DisconnectHose(usize),
    /// Phase 1: the boss reattaches a hose.
    ReconnectHose(usize),
    /// Phase 2: click a node.
    ClickNode(u8),
    /// Phase 3: set the valve.
    SetValve(u8),
    /// Phase 3: echo one symbol.
    SimonInput(u8),
    /// Enter the ARIA override code.
    EnterAriaCode(String),
}

impl Action {
    /// The wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EngagePower => "ENGAGE_POWER",
            Self::FlipBit(_) => "FLIP_BIT",
            Self::SetResonance(_) => "SET_RESONANCE",
            Self::AchieveResonance => "ACHIEVE_RESONANCE",
            Self::CalibrateFreq(_) => "CALIBRATE_FREQ",
            Self::CompleteHandshake => "COMPLETE_HANDSHAKE",
            Self::CompleteThermalTask => "COMPLETE_THERMAL_TASK",
            Self::SetStage(_) => "SET_STAGE",
            Self::IngestData => "INGEST_DATA",
            Self::SetAutoRate(_) => "SET_AUTO_RATE",
            Self::BuyUpgrade(_) => "BUY_UPGRADE",
            Self::AutoTick => "AUTO_TICK",
            Self::ApplyPatch(_) => "APPLY_PATCH",
            Self::CompleteGame => "COMPLETE_GAME",
            Self::SetActiveApp(_) => "SET_ACTIVE_APP",
            Self::EnqueueChat(_) => "ENQUEUE_CHAT",
            Self::PopChatQueue => "POP_CHAT_QUEUE",
            Self::RevealChatMessage => "REVEAL_CHAT_MESSAGE",
            Self::PublishChatOptions => "PUBLISH_CHAT_OPTIONS",
            Self::SelectChatOption(_) => "SELECT_CHAT_OPTION",
            Self::SetChatMode(_) => "SET_CHAT_MODE",
            Self::CloseChat => "CLOSE_CHAT",
            Self::OpenSidebar => "OPEN_SIDEBAR",
            Self::TriggerEgg(_) => "TRIGGER_EGG",
            Self::FindTool(_) => "FIND_TOOL",
            Self::AddHandbookNote(_) => "ADD_HANDBOOK_NOTE",
            Self::SetAriaRevealed => "SET_ARIA_REVEALED",
            Self::DoGaslightReset => "DO_GASLIGHT_RESET",
            Self::TrueEscape => "TRUE_ESCAPE",
            Self::NewGame { .. } => "NEW_GAME",
            Self::LoadState(_) => "LOAD_STATE",
            Self::EnterBossIntro => "ENTER_BOSS_INTRO",
            Self::EnterBossFight => "ENTER_BOSS_FIGHT",
            Self::BossPhaseComplete => "BOSS_PHASE_COMPLETE",
            Self::PlayerHit(_) => "PLAYER_HIT",
            Self::HealPlayer(_) => "HEAL_PLAYER",
            Self::DisconnectHose(_) => "DISCONNECT_HOSE",
            Self::ReconnectHose(_) => "RECONNECT_HOSE",
            Self::ClickNode(_) => "CLICK_NODE",
            Self::SetValve(_) => "SET_VALVE",
            Self::SimonInput(_) => "SIMON_INPUT",
            Self::EnterAriaCode(_) => "ENTER_ARIA_CODE",
        }
    }

    /// Parse a wire action. Unknown types and malformed payloads yield `None`.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape() {
        let json = serde_json::to_value(Action::FlipBit(3)).unwrap();
        assert_eq!(json["type"], "FLIP_BIT");
        assert_eq!(json["payload"], 3);

        let json = serde_json::to_value(Action::NewGame { seed: 9 }).unwrap();
        assert_eq!(json["type"], "NEW_GAME");
        assert_eq!(json["payload"]["seed"], 9);
    }

    #[test]
    fn names_match_wire_tags() {
        let samples = [
            Action::EngagePower,
            Action::SetStage(Stage::Resonance),
            Action::ApplyPatch("x".into()),
            Action::SelectChatOption("c".into()),
            Action::PlayerHit(1),
        ];
        for action in samples {
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(json["type"], action.name());
        }
    }

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!(
            Action::from_json(r#"{"type":"ENGAGE_POWER"}"#),
            Some(Action::EngagePower)
        );
        assert_eq!(
            Action::from_json(r#"{"type":"SET_VALVE","payload":50}"#),
            Some(Action::SetValve(50))
        );
        assert_eq!(Action::from_json(r#"{"type":"SUMMON_DRAGON"}"#), None);
        assert_eq!(Action::from_json("not json"), None);
    }
}
