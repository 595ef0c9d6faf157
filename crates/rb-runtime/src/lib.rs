//! Session runtime for Reboot.
//!
//! Wraps the pure [`rb_core::Engine`] in everything a live game needs: the
//! [`QueueProcessor`] that drains dialogue, the step table mapping scripted
//! side effects onto transitions, stage-scoped timers on a virtual clock, an
//! event bus for presentation, and persistence through [`rb_save`].

/// Presentation events and sinks.
pub mod bus;
/// Session configuration.
pub mod config;
/// Runtime error types.
pub mod error;
/// Dialogue queue draining.
pub mod processor;
/// Stage-scoped timers.
pub mod scheduler;
/// The play session.
pub mod session;
/// Action step mapping.
pub mod steps;
/// The authoritative state holder.
pub mod store;

pub use bus::{EventBus, EventSink, GameEvent, RecordingSink};
pub use config::SessionConfig;
pub use error::{RuntimeError, RuntimeResult};
pub use processor::{DEFAULT_REVEAL_DELAY_MS, Drain, QueueProcessor};
pub use scheduler::{Job, Repeat, ScheduledTask, Scheduler, TaskId};
pub use session::Session;
pub use steps::{FollowUp, StepBuilder, StepPlan, StepTable};
pub use store::GameStore;
