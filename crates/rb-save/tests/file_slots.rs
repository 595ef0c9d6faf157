//! Integration tests: file slots.
use proptest::prelude::*;
use rb_core::{GameState, Stage};
use rb_save::{FileStore, SAVE_VERSION, SaveManager, SlotId, SlotStore};
use tempfile::TempDir;

fn file_manager(dir: &TempDir) -> SaveManager<FileStore> {
    SaveManager::new(FileStore::new(dir.path().join("saves")))
}

#[test]
fn writes_named_files() {
    let dir = TempDir::new().unwrap();
    let mut m = file_manager(&dir);
    m.save(SlotId::Auto, &GameState::initial(1)).unwrap();
    m.save(SlotId::Manual(2), &GameState::initial(2)).unwrap();

    let saves = dir.path().join("saves");
    assert!(saves.join("auto.json").exists());
    assert!(saves.join("slot-2.json").exists());
    assert_eq!(
        m.store().list().unwrap(),
        vec![SlotId::Auto, SlotId::Manual(2)]
    );
}

#[test]
fn reload_from_disk() {
    let dir = TempDir::new().unwrap();
    let mut state = GameState::initial(77);
    state.stage = Stage::Unlocked;
    state.loop_count = 1;
    state.progress.rapport = 8;
    file_manager(&dir).save(SlotId::Manual(1), &state).unwrap();

    let record = file_manager(&dir).load(SlotId::Manual(1)).unwrap();
    assert_eq!(record.state, state);
    assert_eq!(record.stage_name, "UNLOCKED");
}

#[test]
fn hand_edited_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut m = file_manager(&dir);
    m.save(SlotId::Auto, &GameState::initial(1)).unwrap();

    let path = dir.path().join("saves").join("auto.json");
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, text.replace(SAVE_VERSION, "reboot-save/1")).unwrap();

    assert!(m.load(SlotId::Auto).is_none());
}

#[test]
fn truncated_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut m = file_manager(&dir);
    m.save(SlotId::Auto, &GameState::initial(1)).unwrap();

    let path = dir.path().join("saves").join("auto.json");
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, &text[..text.len() / 2]).unwrap();

    assert!(m.load(SlotId::Auto).is_none());
}

#[test]
fn unrelated_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    let saves = dir.path().join("saves");
    std::fs::create_dir_all(&saves).unwrap();
    std::fs::write(saves.join("notes.txt"), "hi").unwrap();
    std::fs::write(saves.join("backup.json"), "{}").unwrap();
    assert!(file_manager(&dir).store().list().unwrap().is_empty());
}

proptest! {
    #[test]
    fn checkpoint_fields_survive(seed in any::<u64>(), rapport in -20i32..=10, loops in 0u32..3) {
        let dir = TempDir::new().unwrap();
        let mut state = GameState::initial(seed);
        state.progress.rapport = rapport;
        state.loop_count = loops;
        let mut m = file_manager(&dir);
        m.save(SlotId::Auto, &state).unwrap();
        let record = m.load(SlotId::Auto).unwrap();
        prop_assert_eq!(record.rapport, rapport);
        prop_assert_eq!(record.loop_count, loops);
        prop_assert_eq!(record.state.rng_seed, seed);
    }
}
