//! Cooperative drain of the dialogue queue.
//!
//! The processor is the only consumer of `chat_queue`. It holds nothing but
//! the due time of the message currently being "typed", tagged with the
//! store's queue epoch so a replaced queue restarts the delay. Everything
//! else is read from the state on each call, which makes a drain
//! restartable after a load, a reset or a branch splice.

use rb_core::{Action, DialogueStep};
use tracing::warn;

use crate::bus::{EventSink, GameEvent};
use crate::scheduler::{Job, Scheduler};
use crate::steps::StepTable;
use crate::store::GameStore;

/// Default typing delay before a message lands.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1200;

/// Upper bound on steps handled by one drain call.
const MAX_STEPS_PER_DRAIN: usize = 512;

/// Why a drain stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drain {
    /// The queue is empty.
    Idle,
    /// A message is being revealed and lands at `due_ms`.
    Revealing {
        /// When the reveal commits.
        due_ms: u64,
    },
    /// Options are published and the player has to pick one.
    AwaitingChoice,
}

/// Drains the dialogue queue.
#[derive(Debug, Clone)]
pub struct QueueProcessor {
    reveal_delay_ms: u64,
    steps: StepTable,
    in_flight: Option<Reveal>,
}

/// The message being typed: when it lands, and the queue epoch it was
/// started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reveal {
    due_ms: u64,
    epoch: u64,
}

impl QueueProcessor {
    /// A processor with the standard step table.
    pub fn new(reveal_delay_ms: u64) -> Self {
        Self {
            reveal_delay_ms,
            steps: StepTable::standard(),
            in_flight: None,
        }
    }

    /// Replace the step table.
    pub fn with_steps(mut self, steps: StepTable) -> Self {
        self.steps = steps;
        self
    }

    /// The step table.
    pub fn steps(&self) -> &StepTable {
        &self.steps
    }

    /// When the in-flight reveal commits, if any.
    pub fn next_wake(&self) -> Option<u64> {
        self.in_flight.map(|r| r.due_ms)
    }

    /// Forget the in-flight reveal.
    pub fn reset(&mut self) {
        self.in_flight = None;
    }

    /// Process queue steps until the queue empties, a reveal is pending or
    /// the player has to choose.
    ///
    /// Action steps are popped before their transitions run, so a
    /// transition that re-seeds the queue keeps its new content intact.
    /// Delayed transitions are scheduled as one-shot tasks owned by the
    /// current stage.
    pub fn drain(
        &mut self,
        now_ms: u64,
        store: &mut GameStore,
        scheduler: &mut Scheduler,
        sink: &dyn EventSink,
    ) -> Drain {
        for _ in 0..MAX_STEPS_PER_DRAIN {
            let state = store.state();
            if state.awaiting_choice() {
                self.in_flight = None;
                return Drain::AwaitingChoice;
            }
            let Some(head) = state.chat_queue.front() else {
                self.in_flight = None;
                return Drain::Idle;
            };
            match head {
                DialogueStep::Message { .. } => {
                    let epoch = store.queue_epoch();
                    let due_ms = match self.in_flight {
                        Some(reveal) if reveal.epoch == epoch => reveal.due_ms,
                        _ => {
                            let due_ms = now_ms + self.reveal_delay_ms;
                            self.in_flight = Some(Reveal { due_ms, epoch });
                            due_ms
                        }
                    };
                    if due_ms > now_ms {
                        return Drain::Revealing { due_ms };
                    }
                    self.in_flight = None;
                    store.dispatch(Action::RevealChatMessage, sink);
                    if let Some(message) = store.state().chat_messages.last() {
                        sink.publish(GameEvent::MessageRevealed(message.clone()));
                    }
                }
                DialogueStep::Options { .. } => {
                    self.in_flight = None;
                    store.dispatch(Action::PublishChatOptions, sink);
                    let options = &store.state().chat_options;
                    if !options.is_empty() {
                        sink.publish(GameEvent::OptionsPublished(options.clone()));
                    }
                }
                DialogueStep::Action(step) => {
                    self.in_flight = None;
                    let step = step.clone();
                    let owner = state.stage;
                    store.dispatch(Action::PopChatQueue, sink);
                    let plan = match self.steps.plan(&step) {
                        Ok(plan) => plan,
                        Err(e) => {
                            warn!(kind = %step.kind, "skipping action step: {e}");
                            continue;
                        }
                    };
                    for event in plan.events {
                        sink.publish(event);
                    }
                    if let Some(follow_up) = plan.follow_up {
                        for action in follow_up.actions {
                            scheduler.schedule_once(
                                now_ms + follow_up.delay_ms,
                                Some(owner),
                                Job::Dispatch(action),
                            );
                        }
                    }
                    for action in plan.actions {
                        store.dispatch(action, sink);
                    }
                }
            }
        }
        warn!("dialogue drain hit its step limit");
        Drain::Idle
    }
}

impl Default for QueueProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_DELAY_MS)
    }
}
