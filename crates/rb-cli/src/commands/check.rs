use std::path::Path;

use colored::Colorize;
use rb_core::Script;
use rb_runtime::StepTable;

pub fn run(script_path: Option<&Path>) -> Result<(), String> {
    let (script, label) = match script_path {
        Some(path) => (
            Script::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
            path.display().to_string(),
        ),
        None => (Script::builtin(), "built-in script".to_string()),
    };

    let mut problems: Vec<String> = script.validate().iter().map(|e| e.to_string()).collect();
    problems.extend(
        StepTable::standard()
            .validate(&script)
            .iter()
            .map(|e| e.to_string()),
    );

    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("  {} {problem}", "ERROR".red().bold());
        }
        return Err(format!("{} problem(s) in {label}", problems.len()));
    }

    println!("  All checks passed for {label}.");
    println!(
        "  {} nodes, {} action steps",
        script.len(),
        script.action_steps().count()
    );

    Ok(())
}
