//! Error types for the core crate.
//!
//! The transition engine never fails; these errors come from loading and
//! validating dialogue scripts.

use thiserror::Error;

use crate::dialogue::ActionStepKind;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading or validating dialogue content.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A named entry point has no node.
    #[error("entry point `{entry}` refers to missing node `{node}`")]
    MissingEntry {
        /// Entry point name.
        entry: String,
        /// Node id it points at.
        node: String,
    },

    /// An option points at a node that does not exist.
    #[error("node `{node}`: choice `{choice}` leads to unknown node `{target}`")]
    UnresolvedNode {
        /// Node containing the option set.
        node: String,
        /// The offending choice id.
        choice: String,
        /// The missing target.
        target: String,
    },

    /// An option set with no choices would stall the queue forever.
    #[error("node `{0}` contains an empty option set")]
    EmptyOptions(String),

    /// A stage-setting step without a stage.
    #[error("node `{node}`: `{kind}` step has no stage payload")]
    MissingStage {
        /// Node containing the step.
        node: String,
        /// The step kind.
        kind: ActionStepKind,
    },

    /// Two choices in one node share an id.
    #[error("node `{node}`: duplicate choice id `{choice}`")]
    DuplicateChoice {
        /// Node containing the option set.
        node: String,
        /// The repeated id.
        choice: String,
    },

    /// Script JSON could not be parsed.
    #[error("script parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Script file could not be read.
    #[error("script io error: {0}")]
    Io(#[from] std::io::Error),
}
