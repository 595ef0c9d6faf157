//! The persisted record shape.

use chrono::{DateTime, Utc};
use rb_core::GameState;
use serde::{Deserialize, Serialize};

/// Schema version of the running build. Any other version is rejected.
pub const SAVE_VERSION: &str = "reboot-save/3";

/// One saved snapshot plus the header fields shown in slot listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    /// Schema version that wrote the record.
    pub version: String,
    /// Unix epoch milliseconds.
    pub saved_at: i64,
    /// Stage name at save time.
    pub stage_name: String,
    /// Rapport at save time.
    pub rapport: i32,
    /// Loop count at save time.
    pub loop_count: u32,
    /// The full state.
    pub state: GameState,
}

impl SaveRecord {
    /// Snapshot a state. The state is cloned, never referenced.
    pub fn capture(version: impl Into<String>, state: &GameState, saved_at: i64) -> Self {
        Self {
            version: version.into(),
            saved_at,
            stage_name: state.stage.name().to_string(),
            rapport: state.progress.rapport,
            loop_count: state.loop_count,
            state: state.clone(),
        }
    }

    /// `saved_at` as a UTC timestamp.
    pub fn saved_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.saved_at)
    }
}
