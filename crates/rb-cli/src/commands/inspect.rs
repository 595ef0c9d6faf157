use std::path::Path;

use rb_save::SlotId;

pub fn run(dir: &Path, slot: &str) -> Result<(), String> {
    let slot: SlotId = slot.parse().map_err(|e| format!("{e}"))?;
    let saves = super::open_saves(dir);
    saves.check_slot(slot).map_err(|e| e.to_string())?;

    let record = saves
        .load(slot)
        .ok_or_else(|| format!("slot {slot} holds no loadable save"))?;
    let json = serde_json::to_string_pretty(&record).map_err(|e| e.to_string())?;
    println!("{json}");

    Ok(())
}
