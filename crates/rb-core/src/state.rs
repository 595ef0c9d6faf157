//! The single authoritative game state.
//!
//! Fields are grouped by what survives the loop reset: everything in
//! [`Progress`] is durable, `loop_count` is set explicitly by the reset
//! family, and every other field is volatile.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::dialogue::{ChatChoice, ChatMessage, DialogueStep};
use crate::ids::{AppId, ChatMode, Note, ToolId};
use crate::stage::Stage;
use crate::tuning::{BIT_COUNT, Tuning};

/// The bit lines on the calibration board.
pub type Bits = [bool; BIT_COUNT];

/// A recorded dialogue choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    /// The choice id.
    pub choice_id: String,
    /// The rapport delta it carried.
    pub rapport_boost: i32,
}

/// Progress that survives the loop reset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Clamped relationship score.
    pub rapport: i32,
    /// Unclamped accumulator of the same deltas.
    pub karma: i32,
    /// Every choice made, in order.
    pub user_choices: Vec<ChoiceRecord>,
    /// Tools discovered so far.
    pub tools_found: BTreeSet<ToolId>,
    /// Handbook notes, deduplicated by id.
    pub handbook_notes: Vec<Note>,
    /// Frequencies the player has calibrated.
    pub calibrated_freqs: BTreeSet<u32>,
    /// Whether ARIA's existence has been revealed.
    pub aria_revealed: bool,
    /// Whether the legacy logs were unlocked.
    pub legacy_logs_unlocked: bool,
    /// Whether the nexus has been seen.
    pub nexus_first_seen: bool,
    /// Whether the player went for the cake.
    pub cake_attempted: bool,
    /// Entities the player archived.
    pub archived_entities: Vec<String>,
    /// Number of boss introductions experienced.
    pub apex_encounters: u32,
    /// Number of successful backend patches.
    pub backend_patch_count: u32,
}

impl Progress {
    /// Record a tool. Returns `false` if it was already found.
    pub fn find_tool(&mut self, tool: ToolId) -> bool {
        self.tools_found.insert(tool)
    }

    /// Append a note unless one with the same id exists.
    pub fn add_note(&mut self, note: Note) -> bool {
        if self.handbook_notes.iter().any(|n| n.id == note.id) {
            return false;
        }
        self.handbook_notes.push(note);
        true
    }

    /// Whether the choice id appears in the history.
    pub fn has_chosen(&self, choice_id: &str) -> bool {
        self.user_choices.iter().any(|c| c.choice_id == choice_id)
    }

    /// Fraction of past choices whose delta was positive, or 0 with no history.
    pub fn positive_choice_fraction(&self) -> f64 {
        if self.user_choices.is_empty() {
            return 0.0;
        }
        let positive = self
            .user_choices
            .iter()
            .filter(|c| c.rapport_boost > 0)
            .count();
        positive as f64 / self.user_choices.len() as f64
    }

    /// Whether any lore reveal has happened.
    pub fn lore_revealed(&self) -> bool {
        self.aria_revealed || self.legacy_logs_unlocked || self.nexus_first_seen
    }
}

/// Volatile sub-state of the boss encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossState {
    /// 0 outside the fight, 1..=3 while fighting, 4 once won.
    pub phase: u8,
    /// Player hit points.
    pub player_hp: i32,
    /// Coolant hoses; phase 1 wants both disconnected.
    pub hoses_connected: [bool; 2],
    /// Nodes clicked so far in phase 2.
    pub node_click_sequence: Vec<u8>,
    /// Valve opening in phase 3.
    pub valve_percent: u8,
    /// Sequence to echo in phase 3.
    pub simon_sequence: Vec<u8>,
    /// What the player has echoed so far.
    pub simon_player_input: Vec<u8>,
}

impl BossState {
    /// A fresh encounter with full hit points.
    pub fn fresh(max_hp: i32) -> Self {
        Self {
            phase: 0,
            player_hp: max_hp,
            hoses_connected: [true, true],
            node_click_sequence: Vec::new(),
            valve_percent: 0,
            simon_sequence: Vec::new(),
            simon_player_input: Vec::new(),
        }
    }
}

impl Default for BossState {
    fn default() -> Self {
        Self::fresh(Tuning::default().boss_max_hp)
    }
}

/// The complete game state. Replaced, never mutated in place, by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current node in the stage graph.
    pub stage: Stage,
    /// In-fiction resets experienced.
    pub loop_count: u32,
    /// Durable progress.
    pub progress: Progress,
    /// Whether the breaker is engaged.
    pub power_on: bool,
    /// Current bit lines.
    pub bits: Bits,
    /// Pattern the bits must match.
    pub target_bits: Bits,
    /// Current oscillator setting.
    pub resonance_hz: u32,
    /// Cycles routed so far.
    pub data_cycles: f64,
    /// Spendable currency.
    pub currency: f64,
    /// Cycles per ingest.
    pub click_power: u32,
    /// Auto-router rate; each tick adds half of it.
    pub auto_rate: f64,
    /// Whether the backend was patched this loop.
    pub backend_patched: bool,
    /// Whether the pre-wipe ending was reached this loop.
    pub game_complete: bool,
    /// Pending dialogue playback.
    pub chat_queue: VecDeque<DialogueStep>,
    /// Committed transcript.
    pub chat_messages: Vec<ChatMessage>,
    /// Published options awaiting a choice.
    pub chat_options: Vec<ChatChoice>,
    /// How many queue steps were already behind the published options.
    /// A pick replaces these; later steps survive it.
    #[serde(default)]
    pub branch_tail: usize,
    /// Whether the chat surface is open.
    pub chat_open: bool,
    /// Whether the handbook sidebar is open.
    pub sidebar_open: bool,
    /// Focused app.
    pub active_app: Option<AppId>,
    /// Chat line source.
    pub chat_mode: ChatMode,
    /// Whether the antagonist was purified.
    pub riley_dead: bool,
    /// Boss encounter sub-state.
    pub boss: BossState,
    /// Seed for the next random outcome.
    pub rng_seed: u64,
}

impl GameState {
    /// A freshly initialized state with default tuning and an empty queue.
    pub fn initial(seed: u64) -> Self {
        Self::with_tuning(seed, &Tuning::default())
    }

    /// A freshly initialized state for the given tuning.
    pub fn with_tuning(seed: u64, tuning: &Tuning) -> Self {
        Self {
            stage: Stage::PowerOff,
            loop_count: 0,
            progress: Progress::default(),
            power_on: false,
            bits: [false; BIT_COUNT],
            target_bits: [false; BIT_COUNT],
            resonance_hz: 0,
            data_cycles: 0.0,
            currency: 0.0,
            click_power: 1,
            auto_rate: 0.0,
            backend_patched: false,
            game_complete: false,
            chat_queue: VecDeque::new(),
            chat_messages: Vec::new(),
            chat_options: Vec::new(),
            branch_tail: 0,
            chat_open: false,
            sidebar_open: false,
            active_app: None,
            chat_mode: ChatMode::Scripted,
            riley_dead: false,
            boss: BossState::fresh(tuning.boss_max_hp),
            rng_seed: seed,
        }
    }

    /// Whether the bits match the target pattern.
    pub fn bits_match(&self) -> bool {
        self.bits == self.target_bits
    }

    /// Whether an option set is waiting for the player.
    pub fn awaiting_choice(&self) -> bool {
        !self.chat_options.is_empty()
    }

    /// Render bits as a `0`/`1` string, most significant line first.
    pub fn bits_string(bits: &Bits) -> String {
        bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial(0)
    }
}
