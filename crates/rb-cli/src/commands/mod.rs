pub mod check;
pub mod inspect;
pub mod play;
pub mod slots;

use std::path::Path;

use rb_save::{FileStore, SaveManager};

/// Save manager over a directory of slot files.
fn open_saves(dir: &Path) -> SaveManager<FileStore> {
    SaveManager::new(FileStore::new(dir))
}

/// Format epoch milliseconds for display.
fn format_saved_at(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}
