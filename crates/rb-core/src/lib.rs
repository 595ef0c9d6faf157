//! Core state model and transition engine for Reboot.
//!
//! A single authoritative [`GameState`] is advanced exclusively through typed
//! [`Action`]s by the pure [`Engine::apply`] reducer. The dialogue content the
//! engine splices into the chat queue lives in a [`Script`], which can be
//! validated ahead of time so that every branch target resolves.

/// The closed action vocabulary.
pub mod action;
/// Dialogue steps, choices and transcript lines.
pub mod dialogue;
/// The transition engine.
pub mod engine;
/// Error types for script loading and validation.
pub mod error;
/// Small identifier and value types.
pub mod ids;
/// Dialogue script nodes and entry points.
pub mod script;
/// The fixed stage graph.
pub mod stage;
/// Game state and its durable/volatile partition.
pub mod state;
/// Gameplay constants.
pub mod tuning;

pub use action::Action;
pub use dialogue::{
    ActionStep, ActionStepKind, ChatChoice, ChatMessage, DialogueStep, Sender, StepPayload,
};
pub use engine::Engine;
pub use error::{CoreError, CoreResult};
pub use ids::{AppId, ChatMode, Egg, Note, NoteStyle, ToolId, UpgradeKind};
pub use script::{Entry, EntryPoints, Script};
pub use stage::Stage;
pub use state::{BossState, ChoiceRecord, GameState, Progress};
pub use tuning::{BIT_COUNT, Tuning};
