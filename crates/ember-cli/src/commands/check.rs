use std::path::Path;

use colored::Colorize;
use ember_dialog::{DialogTree, ValidationIssue};
use ember_puzzle::PuzzleDeck;

pub fn run(dir: &Path) -> Result<(), String> {
    let mut errors = 0;
    let mut warnings = 0;

    let dialog_files = super::json_files(&dir.join("dialogs"))?;
    for path in &dialog_files {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
        let tree: DialogTree = match serde_json::from_str(&raw) {
            Ok(tree) => tree,
            Err(e) => {
                eprintln!("  {} {}: {e}", "error:".red().bold(), path.display());
                errors += 1;
                continue;
            }
        };
        for issue in tree.validate() {
            report(&issue);
            if issue.is_error {
                errors += 1;
            } else {
                warnings += 1;
            }
        }
    }

    let deck_files = super::json_files(&dir.join("puzzles"))?;
    for path in &deck_files {
        if let Err(e) = PuzzleDeck::load(path) {
            eprintln!("  {} {}: {e}", "error:".red().bold(), path.display());
            errors += 1;
        }
    }

    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
        return Err("content check failed with errors".into());
    }
    if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }

    println!(
        "  All checks passed: {} dialogs, {} puzzle decks",
        dialog_files.len(),
        deck_files.len()
    );
    Ok(())
}

fn report(issue: &ValidationIssue) {
    let text = issue.to_string();
    if issue.is_error {
        eprintln!("  {}", text.red());
    } else {
        eprintln!("  {}", text.yellow());
    }
}
