//! Error types for persistence.
//!
//! Only writes surface errors. Reads that fail for any reason are reported
//! as "no save" by [`crate::SaveManager::load`].

use thiserror::Error;

/// Result type for persistence operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while writing or addressing save slots.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Filesystem failure.
    #[error("save io error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized.
    #[error("save serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A manual slot outside `1..=max`.
    #[error("slot {slot} is out of range (manual slots are 1..={max})")]
    SlotOutOfRange {
        /// The requested slot number.
        slot: u8,
        /// Highest manual slot.
        max: u8,
    },

    /// A slot name that is neither `auto` nor a number.
    #[error("unknown slot: {0}")]
    UnknownSlot(String),
}
