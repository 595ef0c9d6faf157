//! Skill-check collaborator for Reboot.
//!
//! A read-only consumer of [`rb_core::GameState`]: stats and the fate bonus
//! are derived from durable progress, checks are a d20 plus modifiers, and
//! [`karma_polar`] picks which boss introduction fires.

pub mod check;
pub mod dice;
pub mod error;
pub mod polarity;
pub mod stats;

pub use check::{CheckResult, Tier, resolve, roll_check};
pub use dice::Die;
pub use error::{MechError, MechResult};
pub use polarity::{Polarity, karma_polar};
pub use stats::{MAX_FATE, StatKind, Stats, build_stats, fate};
