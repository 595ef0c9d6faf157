//! Slot-level save and load with the version gate.

use rb_core::GameState;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{SaveError, SaveResult};
use crate::record::{SAVE_VERSION, SaveRecord};
use crate::slot::SlotId;
use crate::store::SlotStore;

/// Default number of manual slots.
pub const DEFAULT_MANUAL_SLOTS: u8 = 3;

/// Header of an accepted save, for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSummary {
    /// Which slot.
    pub slot: SlotId,
    /// Unix epoch milliseconds.
    pub saved_at: i64,
    /// Stage name at save time.
    pub stage_name: String,
    /// Rapport at save time.
    pub rapport: i32,
    /// Loop count at save time.
    pub loop_count: u32,
}

impl SlotSummary {
    fn from_record(slot: SlotId, record: &SaveRecord) -> Self {
        Self {
            slot,
            saved_at: record.saved_at,
            stage_name: record.stage_name.clone(),
            rapport: record.rapport,
            loop_count: record.loop_count,
        }
    }
}

/// Reads and writes [`SaveRecord`]s through a [`SlotStore`].
///
/// A record is only handed back by [`SaveManager::load`] when its version
/// equals the manager's version exactly. Anything else reads as an empty
/// slot.
#[derive(Debug, Clone)]
pub struct SaveManager<S: SlotStore> {
    store: S,
    version: String,
    manual_slots: u8,
}

impl<S: SlotStore> SaveManager<S> {
    /// Wrap a store with the build's [`SAVE_VERSION`].
    pub fn new(store: S) -> Self {
        Self {
            store,
            version: SAVE_VERSION.to_string(),
            manual_slots: DEFAULT_MANUAL_SLOTS,
        }
    }

    /// Override the accepted version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the number of manual slots.
    pub fn with_manual_slots(mut self, count: u8) -> Self {
        self.manual_slots = count;
        self
    }

    /// The accepted version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of manual slots.
    pub fn manual_slots(&self) -> u8 {
        self.manual_slots
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Reject manual slots outside `1..=manual_slots`.
    pub fn check_slot(&self, slot: SlotId) -> SaveResult<()> {
        match slot {
            SlotId::Manual(n) if n == 0 || n > self.manual_slots => Err(SaveError::SlotOutOfRange {
                slot: n,
                max: self.manual_slots,
            }),
            _ => Ok(()),
        }
    }

    /// Write `state` to `slot`, stamped with the current time.
    pub fn save(&mut self, slot: SlotId, state: &GameState) -> SaveResult<SaveRecord> {
        self.save_at(slot, state, chrono::Utc::now().timestamp_millis())
    }

    /// Write `state` to `slot` with an explicit timestamp.
    pub fn save_at(&mut self, slot: SlotId, state: &GameState, saved_at: i64) -> SaveResult<SaveRecord> {
        self.check_slot(slot)?;
        let record = SaveRecord::capture(self.version.clone(), state, saved_at);
        let json = serde_json::to_string_pretty(&record)?;
        self.store.write(slot, &json)?;
        info!(
            slot = %slot,
            stage = record.stage_name.as_str(),
            loop_count = record.loop_count,
            "saved game"
        );
        Ok(record)
    }

    /// Read `slot` through the version gate.
    pub fn load(&self, slot: SlotId) -> Option<SaveRecord> {
        if let Err(e) = self.check_slot(slot) {
            warn!(slot = %slot, "{e}");
            return None;
        }
        let text = match self.store.read(slot) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(slot = %slot, "slot is empty");
                return None;
            }
            Err(e) => {
                warn!(slot = %slot, "could not read save: {e}");
                return None;
            }
        };
        let record: SaveRecord = match serde_json::from_str(&text) {
            Ok(record) => record,
            Err(e) => {
                warn!(slot = %slot, "discarding unreadable save: {e}");
                return None;
            }
        };
        if record.version != self.version {
            warn!(
                slot = %slot,
                found = record.version.as_str(),
                expected = self.version.as_str(),
                "discarding save from another version"
            );
            return None;
        }
        Some(record)
    }

    /// Whether `slot` holds a loadable record.
    pub fn has_save(&self, slot: SlotId) -> bool {
        self.load(slot).is_some()
    }

    /// Summaries of every loadable slot, auto first.
    pub fn summaries(&self) -> Vec<SlotSummary> {
        let slots = match self.store.list() {
            Ok(slots) => slots,
            Err(e) => {
                warn!("could not list saves: {e}");
                return Vec::new();
            }
        };
        slots
            .into_iter()
            .filter_map(|slot| self.load(slot).map(|r| SlotSummary::from_record(slot, &r)))
            .collect()
    }

    /// Clear `slot`.
    pub fn remove(&mut self, slot: SlotId) -> SaveResult<bool> {
        self.check_slot(slot)?;
        let removed = self.store.remove(slot)?;
        if removed {
            info!(slot = %slot, "deleted save");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rb_core::Stage;

    fn manager() -> SaveManager<MemoryStore> {
        SaveManager::new(MemoryStore::new())
    }

    #[test]
    fn save_then_load_returns_same_state() {
        let mut m = manager();
        let mut state = GameState::initial(9);
        state.stage = Stage::RoutingAuto;
        state.progress.rapport = 3;
        m.save(SlotId::Auto, &state).unwrap();
        let record = m.load(SlotId::Auto).unwrap();
        assert_eq!(record.state, state);
        assert_eq!(record.version, SAVE_VERSION);
    }

    #[test]
    fn empty_slot_loads_none() {
        assert!(manager().load(SlotId::Manual(1)).is_none());
    }

    #[test]
    fn corrupt_slot_loads_none() {
        let mut m = manager();
        m.store_mut().write(SlotId::Auto, "{ not json").unwrap();
        assert!(m.load(SlotId::Auto).is_none());
    }

    #[test]
    fn other_version_is_discarded() {
        let mut old = SaveManager::new(MemoryStore::new()).with_version("reboot-save/2");
        old.save(SlotId::Auto, &GameState::initial(1)).unwrap();
        let current = SaveManager::new(old.store().clone());
        assert!(current.load(SlotId::Auto).is_none());
        assert!(current.summaries().is_empty());
    }

    #[test]
    fn manual_slot_range_is_enforced() {
        let mut m = manager().with_manual_slots(2);
        let state = GameState::initial(1);
        assert!(m.save(SlotId::Manual(2), &state).is_ok());
        assert!(matches!(
            m.save(SlotId::Manual(3), &state),
            Err(SaveError::SlotOutOfRange { slot: 3, max: 2 })
        ));
        assert!(m.save(SlotId::Manual(0), &state).is_err());
        assert!(m.load(SlotId::Manual(3)).is_none());
    }

    #[test]
    fn summaries_skip_bad_slots() {
        let mut m = manager();
        let mut state = GameState::initial(1);
        state.loop_count = 2;
        m.save_at(SlotId::Manual(1), &state, 10).unwrap();
        m.save_at(SlotId::Auto, &GameState::initial(2), 20).unwrap();
        m.store_mut().write(SlotId::Manual(2), "garbage").unwrap();
        let summaries = m.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].slot, SlotId::Auto);
        assert_eq!(summaries[1].loop_count, 2);
        assert_eq!(summaries[1].saved_at, 10);
    }

    #[test]
    fn remove_clears_slot() {
        let mut m = manager();
        m.save(SlotId::Manual(1), &GameState::initial(1)).unwrap();
        assert!(m.remove(SlotId::Manual(1)).unwrap());
        assert!(!m.has_save(SlotId::Manual(1)));
        assert!(!m.remove(SlotId::Manual(1)).unwrap());
    }
}
