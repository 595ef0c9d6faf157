use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path) -> Result<(), String> {
    let summaries = super::open_saves(dir).summaries();

    if summaries.is_empty() {
        println!("  No saves found in {}.", dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slot", "Stage", "Loop", "Rapport", "Saved"]);

    for summary in &summaries {
        table.add_row(vec![
            summary.slot.to_string(),
            summary.stage_name.clone(),
            summary.loop_count.to_string(),
            summary.rapport.to_string(),
            super::format_saved_at(summary.saved_at),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} saves", summaries.len());

    Ok(())
}
