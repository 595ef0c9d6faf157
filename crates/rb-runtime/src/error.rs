//! Error types for the session runtime.

use rb_core::{ActionStepKind, CoreError};
use rb_save::SaveError;
use thiserror::Error;

/// Errors that can occur in the session runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No builder is registered for a step kind.
    #[error("no transition is mapped for action step {0}")]
    UnmappedStep(ActionStepKind),

    /// A `SET_STAGE` step without a stage payload.
    #[error("action step {0} requires a stage payload")]
    MissingStagePayload(ActionStepKind),

    /// A scripted action step that does not build.
    #[error("node '{node}': {reason}")]
    InvalidStep {
        /// The node holding the step.
        node: String,
        /// Why it failed.
        reason: String,
    },

    /// Script loading or validation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failed.
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
