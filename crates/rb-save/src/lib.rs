//! Versioned save slots for Reboot.
//!
//! One auto slot plus a configurable number of manual slots. Every record
//! carries the schema version that wrote it; a record from any other
//! version is treated as absent rather than migrated.

/// Autosave checkpoint detection.
pub mod autosave;
/// Persistence error types.
pub mod error;
/// Slot-level save and load.
pub mod manager;
/// The persisted record.
pub mod record;
/// Slot addressing.
pub mod slot;
/// Raw slot storage backends.
pub mod store;

pub use autosave::AutosaveWatch;
pub use error::{SaveError, SaveResult};
pub use manager::{DEFAULT_MANUAL_SLOTS, SaveManager, SlotSummary};
pub use record::{SAVE_VERSION, SaveRecord};
pub use slot::SlotId;
pub use store::{FileStore, MemoryStore, SlotStore};
