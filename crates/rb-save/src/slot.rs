//! Slot addressing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SaveError;

/// A named save slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotId {
    /// Written automatically on every durable checkpoint.
    Auto,
    /// Written on player request. Numbered from 1.
    Manual(u8),
}

impl SlotId {
    /// The storage key, also used as the file stem.
    pub fn key(self) -> String {
        match self {
            Self::Auto => "auto".to_string(),
            Self::Manual(n) => format!("slot-{n}"),
        }
    }

    /// The file name of this slot in a [`crate::FileStore`].
    pub fn file_name(self) -> String {
        format!("{}.json", self.key())
    }

    /// Recover a slot from a storage key.
    pub fn from_key(key: &str) -> Option<Self> {
        if key == "auto" {
            return Some(Self::Auto);
        }
        key.strip_prefix("slot-")?.parse().ok().map(Self::Manual)
    }
}

impl FromStr for SlotId {
    type Err = SaveError;

    /// Accepts `auto`, `3` or `slot-3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        if let Some(slot) = Self::from_key(&trimmed) {
            return Ok(slot);
        }
        trimmed
            .parse::<u8>()
            .map(Self::Manual)
            .map_err(|_| SaveError::UnknownSlot(s.to_string()))
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Manual(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_files() {
        assert_eq!(SlotId::Auto.file_name(), "auto.json");
        assert_eq!(SlotId::Manual(2).file_name(), "slot-2.json");
        assert_eq!(SlotId::from_key("slot-2"), Some(SlotId::Manual(2)));
        assert_eq!(SlotId::from_key("notes"), None);
    }

    #[test]
    fn parse_forms() {
        assert_eq!("auto".parse::<SlotId>().unwrap(), SlotId::Auto);
        assert_eq!(" AUTO ".parse::<SlotId>().unwrap(), SlotId::Auto);
        assert_eq!("3".parse::<SlotId>().unwrap(), SlotId::Manual(3));
        assert_eq!("slot-1".parse::<SlotId>().unwrap(), SlotId::Manual(1));
        assert!(matches!(
            "quick".parse::<SlotId>(),
            Err(SaveError::UnknownSlot(_))
        ));
    }

    #[test]
    fn auto_sorts_first() {
        let mut slots = vec![SlotId::Manual(2), SlotId::Auto, SlotId::Manual(1)];
        slots.sort();
        assert_eq!(slots, vec![SlotId::Auto, SlotId::Manual(1), SlotId::Manual(2)]);
    }
}
