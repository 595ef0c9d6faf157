//! Error types for the mechanics crate.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A stat name that is not one of the four check stats.
    #[error("unknown stat: {0}")]
    UnknownStat(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
