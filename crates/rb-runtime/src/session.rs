//! The play session: engine, queue processor, timers, saves and a virtual
//! clock wired together.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rb_core::{Action, Engine, GameState, Stage};
use rb_mechanics::{CheckResult, StatKind, Stats, build_stats, karma_polar, roll_check};
use rb_save::{AutosaveWatch, SaveManager, SaveRecord, SlotId, SlotStore};
use tracing::{debug, info, warn};

use crate::bus::{EventBus, EventSink, GameEvent};
use crate::config::SessionConfig;
use crate::error::RuntimeResult;
use crate::processor::{Drain, QueueProcessor};
use crate::scheduler::{Job, Repeat, Scheduler};
use crate::store::GameStore;

const MAX_REACTION_ROUNDS: usize = 32;
const MAX_ADVANCE_STEPS: usize = 10_000;
const MAX_SETTLE_ROUNDS: usize = 1_000;

/// A single-player session.
///
/// All time is virtual: nothing happens between calls, and
/// [`Session::advance`] fires due reveals and timers in order. Every
/// mutation goes through the engine, after which the session reacts to
/// stage moves (announcements, boss intro, timer scopes), drains the
/// dialogue queue and writes the auto slot when a checkpoint field moved.
pub struct Session<S: SlotStore> {
    config: SessionConfig,
    store: GameStore,
    processor: QueueProcessor,
    scheduler: Scheduler,
    sink: Box<dyn EventSink>,
    saves: SaveManager<S>,
    autosave: AutosaveWatch,
    rng: StdRng,
    now_ms: u64,
}

impl<S: SlotStore> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("now_ms", &self.now_ms)
            .field("stage", &self.store.state().stage)
            .field("timers", &self.scheduler.len())
            .finish()
    }
}

impl<S: SlotStore> Session<S> {
    /// Start a session on the shipped script.
    pub fn new(config: SessionConfig, slots: S) -> Self {
        Self::with_engine(config, Engine::builtin(), slots)
    }

    /// Start a session on a custom engine.
    pub fn with_engine(config: SessionConfig, engine: Engine, slots: S) -> Self {
        let state = engine.new_game_state(config.seed);
        let saves = SaveManager::new(slots)
            .with_version(config.save_version.clone())
            .with_manual_slots(config.manual_slots);
        Self {
            autosave: AutosaveWatch::primed(&state),
            processor: QueueProcessor::new(config.reveal_delay_ms),
            store: GameStore::new(engine, state),
            scheduler: Scheduler::new(),
            sink: Box::new(EventBus::new()),
            saves,
            rng: StdRng::seed_from_u64(config.seed),
            now_ms: 0,
            config,
        }
    }

    /// Publish events to `sink` instead of the default bus.
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// The current state.
    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    /// The engine.
    pub fn engine(&self) -> &Engine {
        self.store.engine()
    }

    /// The configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Pending timers.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The save manager.
    pub fn saves(&self) -> &SaveManager<S> {
        &self.saves
    }

    /// Whether a message reveal is pending.
    pub fn revealing(&self) -> bool {
        self.processor.next_wake().is_some()
    }

    /// Apply an action and everything it sets in motion. Returns whether
    /// the action changed the state.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if matches!(action, Action::NewGame { .. } | Action::LoadState(_)) {
            let changed = self.replace_state(action);
            self.react();
            return changed;
        }
        let changed = self.store.dispatch(action, self.sink.as_ref());
        self.react();
        changed
    }

    /// Dispatch a wire action. Unknown actions are ignored.
    pub fn dispatch_json(&mut self, raw: &str) -> bool {
        match Action::from_json(raw) {
            Some(action) => self.dispatch(action),
            None => {
                debug!(raw, "unrecognized action ignored");
                false
            }
        }
    }

    /// Pick a published option.
    pub fn select_option(&mut self, choice_id: &str) -> bool {
        self.dispatch(Action::SelectChatOption(choice_id.to_string()))
    }

    /// Move the clock forward, firing reveals and timers in time order.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms.saturating_add(ms);
        self.react();
        for _ in 0..MAX_ADVANCE_STEPS {
            let next = [self.processor.next_wake(), self.scheduler.next_due()]
                .into_iter()
                .flatten()
                .min();
            match next {
                Some(due) if due <= target => {
                    self.now_ms = self.now_ms.max(due);
                    while let Some(task) = self.scheduler.pop_due(self.now_ms) {
                        self.run(task.job);
                    }
                    self.react();
                }
                _ => {
                    self.now_ms = target;
                    return;
                }
            }
        }
        warn!("advance hit its step limit");
        self.now_ms = target;
    }

    /// Advance until no reveal is in flight and no one-shot timer is
    /// pending. Interval timers keep running meanwhile.
    pub fn settle(&mut self) {
        self.react();
        for _ in 0..MAX_SETTLE_ROUNDS {
            let next = [self.processor.next_wake(), self.scheduler.next_once_due()]
                .into_iter()
                .flatten()
                .min();
            let Some(due) = next else {
                return;
            };
            self.advance(due.saturating_sub(self.now_ms));
        }
        warn!("settle hit its round limit");
    }

    /// Throw the current game away and start a fresh one.
    pub fn new_game(&mut self) {
        let seed = self.rng.random();
        info!(seed, "new game");
        self.dispatch(Action::NewGame { seed });
    }

    /// Write the current state to manual slot `n`.
    pub fn save_slot(&mut self, n: u8) -> RuntimeResult<SaveRecord> {
        let slot = SlotId::Manual(n);
        let record = self.saves.save(slot, self.store.state())?;
        self.sink.publish(GameEvent::Saved { slot });
        Ok(record)
    }

    /// Restore a slot. Returns false when the slot holds nothing loadable.
    pub fn load_slot(&mut self, slot: SlotId) -> bool {
        let Some(record) = self.saves.load(slot) else {
            return false;
        };
        info!(slot = %slot, stage = record.stage_name.as_str(), "loaded game");
        self.replace_state(Action::LoadState(Box::new(record.state)));
        self.sink.publish(GameEvent::Loaded { slot });
        self.react();
        true
    }

    /// Restore the auto slot.
    pub fn continue_game(&mut self) -> bool {
        self.load_slot(SlotId::Auto)
    }

    /// Current stats.
    pub fn stats(&self) -> Stats {
        build_stats(self.store.state())
    }

    /// Roll a skill check against the current state.
    pub fn roll_check(&mut self, stat: StatKind, dc: i32) -> CheckResult {
        let state = self.store.state();
        let result = roll_check(stat, &build_stats(state), dc, Some(state), &mut self.rng);
        self.sink.publish(GameEvent::CheckRolled(result));
        result
    }

    fn replace_state(&mut self, action: Action) -> bool {
        self.scheduler.clear();
        self.processor.reset();
        let changed = self.store.dispatch(action, self.sink.as_ref());
        self.store.take_transitions();
        let stage = self.store.state().stage;
        self.arm_timers(stage);
        self.autosave.prime(self.store.state());
        changed
    }

    fn run(&mut self, job: Job) {
        match job {
            Job::Dispatch(action) => {
                self.dispatch(action);
            }
            Job::BossPressure => self.boss_pressure(),
        }
    }

    fn boss_pressure(&mut self) {
        let result = self.roll_check(StatKind::Intuition, self.config.boss_pressure_dc);
        if result.success {
            self.sink.publish(GameEvent::HitDodged {
                total: result.total,
            });
        } else {
            self.dispatch(Action::PlayerHit(1));
        }
    }

    /// Drain the queue and react to stage moves until both are quiet.
    fn react(&mut self) {
        for _ in 0..MAX_REACTION_ROUNDS {
            let drain = self.processor.drain(
                self.now_ms,
                &mut self.store,
                &mut self.scheduler,
                self.sink.as_ref(),
            );
            let transitions = self.store.take_transitions();
            if transitions.is_empty() {
                if drain == Drain::AwaitingChoice {
                    debug!("waiting for a choice");
                }
                self.checkpoint();
                return;
            }
            for (from, to) in transitions {
                self.on_stage_change(from, to);
            }
        }
        warn!("stage reactions did not settle");
        self.checkpoint();
    }

    fn on_stage_change(&mut self, from: Stage, to: Stage) {
        debug!(from = %from, to = %to, "reacting to stage change");
        self.arm_timers(to);
        let script = self.store.engine().script();
        let mut steps = Vec::new();
        if to == Stage::BossIntro {
            let polarity = karma_polar(self.store.state());
            debug!(polarity = %polarity, "boss introduction");
            steps.extend(script.entry_steps(polarity.boss_intro()));
        }
        if let Some(announcement) = script.stage_steps(to) {
            steps.extend_from_slice(announcement);
        }
        if !steps.is_empty() {
            self.store
                .dispatch(Action::EnqueueChat(steps), self.sink.as_ref());
        }
    }

    fn arm_timers(&mut self, stage: Stage) {
        self.scheduler.retain_scope(stage);
        let interval = match stage {
            Stage::RoutingAuto | Stage::Unlocked => {
                Some((self.config.auto_tick_ms, Job::Dispatch(Action::AutoTick)))
            }
            Stage::BossFight => Some((self.config.boss_pressure_ms, Job::BossPressure)),
            _ => None,
        };
        let Some((period, job)) = interval else {
            return;
        };
        let armed = self
            .scheduler
            .tasks()
            .iter()
            .any(|t| t.scope == Some(stage) && t.repeat != Repeat::Once && t.job == job);
        if !armed {
            self.scheduler
                .schedule_every(self.now_ms + period, period, Some(stage), job);
        }
    }

    fn checkpoint(&mut self) {
        if !self.config.autosave {
            return;
        }
        let state = self.store.state();
        if !self.autosave.observe(state) {
            return;
        }
        match self.saves.save(SlotId::Auto, state) {
            Ok(_) => self.sink.publish(GameEvent::Saved { slot: SlotId::Auto }),
            Err(e) => warn!("autosave failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::RecordingSink;
    use rb_save::MemoryStore;

    fn session(reveal_ms: u64) -> (Session<MemoryStore>, RecordingSink) {
        let sink = RecordingSink::new();
        let config = SessionConfig::default().with_reveal_delay(reveal_ms);
        let session = Session::new(config, MemoryStore::new()).with_sink(sink.clone());
        (session, sink)
    }

    #[test]
    fn intro_reveals_on_the_clock() {
        let (mut s, sink) = session(1000);
        s.advance(0);
        assert!(s.revealing());
        assert!(s.state().chat_messages.is_empty());

        s.advance(1000);
        assert_eq!(s.state().chat_messages.len(), 1);

        s.settle();
        assert_eq!(s.state().chat_messages.len(), 3);
        assert!(s.state().awaiting_choice());
        assert_eq!(s.now_ms(), 3000);
        assert!(
            sink.events()
                .iter()
                .any(|e| matches!(e, GameEvent::OptionsPublished(_)))
        );
    }

    #[test]
    fn stage_change_queues_announcement_and_autosaves() {
        let (mut s, _) = session(0);
        s.settle();
        assert!(s.select_option("intro_who"));
        s.settle();
        assert!(s.state().sidebar_open);
        assert!(!s.state().chat_open);

        assert!(s.dispatch(Action::EngagePower));
        s.settle();
        assert!(s.state().chat_open);
        let last = s.state().chat_messages.last().map(|m| m.text.as_str());
        assert_eq!(
            last,
            Some("Power is up. Match the bit lines to the pattern on the monitor.")
        );

        let saved = s.saves().load(SlotId::Auto).unwrap();
        assert_eq!(saved.stage_name, "HARDWARE_CALIBRATION");
    }

    #[test]
    fn rejected_action_reports_unchanged() {
        let (mut s, _) = session(0);
        assert!(!s.dispatch(Action::CompleteGame));
        assert!(!s.select_option("nope"));
        assert!(!s.dispatch_json(r#"{"type":"TELEPORT"}"#));
    }
}
