//! The transition engine.
//!
//! [`Engine::apply`] is a total pure function from `(state, action)` to a new
//! state. Each handler returns `Option<GameState>`: `None` means the action's
//! guard failed and the input state is returned unchanged. Nothing here
//! performs I/O or reads a clock; randomness is drawn from the seed carried
//! in the state, so the same inputs always produce the same output.

mod board;
mod boss;
mod chat;
mod progress;
mod reset;
mod routing;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action::Action;
use crate::ids::UpgradeKind;
use crate::script::{Entry, Script};
use crate::stage::Stage;
use crate::state::GameState;
use crate::tuning::Tuning;

/// Immutable configuration plus the reducer.
#[derive(Debug, Clone)]
pub struct Engine {
    script: Script,
    tuning: Tuning,
}

impl Engine {
    /// Create an engine for a script and tuning.
    pub fn new(script: Script, tuning: Tuning) -> Self {
        Self { script, tuning }
    }

    /// An engine running the shipped script with default tuning.
    pub fn builtin() -> Self {
        Self::new(Script::builtin(), Tuning::default())
    }

    /// The dialogue script.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// The gameplay constants.
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// A brand-new game: fresh state, cosmetic target pattern, intro queued.
    pub fn new_game_state(&self, seed: u64) -> GameState {
        let mut state = GameState::with_tuning(seed, &self.tuning);
        state.target_bits = roll(&mut state, board::random_bits);
        state.chat_queue = self.script.entry_steps(Entry::Intro).into();
        state.chat_open = true;
        state
    }

    /// Price of the next upgrade of a kind.
    pub fn upgrade_cost(&self, state: &GameState, kind: UpgradeKind) -> f64 {
        routing::upgrade_cost(state, kind, &self.tuning)
    }

    /// Apply one action. Illegal actions return a clone of `state`.
    pub fn apply(&self, state: &GameState, action: Action) -> GameState {
        let name = action.name();
        match self.transition(state, action) {
            Some(next) => {
                if next.stage != state.stage {
                    tracing::debug!(action = name, from = %state.stage, to = %next.stage, "stage changed");
                } else {
                    tracing::debug!(action = name, stage = %next.stage, "transition applied");
                }
                next
            }
            None => {
                tracing::debug!(action = name, stage = %state.stage, "transition ignored");
                state.clone()
            }
        }
    }

    /// Apply a wire action. Unknown or malformed actions are no-ops.
    pub fn apply_json(&self, state: &GameState, raw: &str) -> GameState {
        match Action::from_json(raw) {
            Some(action) => self.apply(state, action),
            None => {
                tracing::debug!(raw, "unrecognized action ignored");
                state.clone()
            }
        }
    }

    fn transition(&self, state: &GameState, action: Action) -> Option<GameState> {
        let t = &self.tuning;
        match action {
            Action::EngagePower => board::engage_power(state),
            Action::FlipBit(index) => board::flip_bit(state, index),
            Action::SetResonance(hz) => board::set_resonance(state, hz),
            Action::AchieveResonance => board::advance(state, Stage::Resonance, Stage::Handshake),
            Action::CalibrateFreq(hz) => board::calibrate(state, hz),
            Action::CompleteHandshake => {
                board::advance(state, Stage::Handshake, Stage::ThermalRegulation)
            }
            Action::CompleteThermalTask => {
                board::advance(state, Stage::ThermalRegulation, Stage::RoutingManual)
            }
            Action::SetStage(stage) => board::force_stage(state, stage),

            Action::IngestData => routing::ingest(state, t),
            Action::SetAutoRate(rate) => routing::set_auto_rate(state, rate),
            Action::BuyUpgrade(kind) => routing::buy_upgrade(state, kind, t),
            Action::AutoTick => routing::auto_tick(state, t),
            Action::ApplyPatch(text) => routing::apply_patch(state, &text, t),
            Action::CompleteGame => routing::complete_game(state),

            Action::SetActiveApp(app) => chat::set_active_app(state, app),
            Action::EnqueueChat(steps) => chat::enqueue(state, steps),
            Action::PopChatQueue => chat::pop(state),
            Action::RevealChatMessage => chat::reveal_message(state),
            Action::PublishChatOptions => chat::publish_options(state),
            Action::SelectChatOption(choice_id) => {
                chat::select_option(state, &choice_id, &self.script, t)
            }
            Action::SetChatMode(mode) => chat::set_mode(state, mode),
            Action::CloseChat => chat::close(state),
            Action::OpenSidebar => chat::open_sidebar(state),

            Action::TriggerEgg(egg) => progress::trigger_egg(state, egg),
            Action::FindTool(tool) => progress::find_tool(state, tool),
            Action::AddHandbookNote(note) => progress::add_note(state, note),
            Action::SetAriaRevealed => progress::reveal_aria(state),

            Action::DoGaslightReset => reset::gaslight(state, &self.script, t),
            Action::TrueEscape => reset::true_escape(state, &self.script, t),
            Action::NewGame { seed } => Some(self.new_game_state(seed)),
            Action::LoadState(snapshot) => Some(*snapshot),

            Action::EnterBossIntro => boss::enter_intro(state, t),
            Action::EnterBossFight => boss::enter_fight(state, t),
            Action::BossPhaseComplete => boss::phase_complete(state, t),
            Action::PlayerHit(damage) => boss::player_hit(state, damage, &self.script, t),
            Action::HealPlayer(amount) => boss::heal(state, amount, t),
            Action::DisconnectHose(index) => boss::disconnect_hose(state, index, t),
            Action::ReconnectHose(index) => boss::reconnect_hose(state, index),
            Action::ClickNode(node) => boss::click_node(state, node, t),
            Action::SetValve(percent) => boss::set_valve(state, percent, t),
            Action::SimonInput(symbol) => boss::simon_input(state, symbol, t),
            Action::EnterAriaCode(code) => boss::enter_aria_code(state, &code, t),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Draw from the state's seed and store the successor seed back.
fn roll<T>(state: &mut GameState, draw: impl FnOnce(&mut StdRng) -> T) -> T {
    let mut rng = StdRng::seed_from_u64(state.rng_seed);
    let out = draw(&mut rng);
    state.rng_seed = rng.random();
    out
}
