pub mod check;
pub mod play;
pub mod progress;
pub mod talk;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use comfy_table::{ContentArrangement, Table};
use ember_core::StatVector;
use ember_dialog::DialogTree;
use ember_puzzle::{PuzzleDeck, PuzzleKind};

/// Sorted `.json` files directly under `dir`.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| format!("cannot read '{}': {e}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// File stem as a display id.
fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load `dialogs/<npc>.json`, listing the known NPCs when it is missing.
fn load_dialog(dir: &Path, npc: &str) -> Result<DialogTree, String> {
    let dialogs = dir.join("dialogs");
    let path = dialogs.join(format!("{npc}.json"));
    if !path.is_file() {
        let known: Vec<String> = json_files(&dialogs)
            .unwrap_or_default()
            .iter()
            .map(|p| stem(p))
            .collect();
        return Err(format!(
            "unknown NPC '{npc}' (available: {})",
            known.join(", ")
        ));
    }
    DialogTree::load(&path).map_err(|e| format!("{}: {e}", path.display()))
}

/// Load `puzzles/<kind>.json`.
fn load_deck(dir: &Path, kind: PuzzleKind) -> Result<PuzzleDeck, String> {
    let path = dir.join("puzzles").join(format!("{}.json", kind.key()));
    PuzzleDeck::load(&path).map_err(|e| format!("{}: {e}", path.display()))
}

fn stats_table(stats: &StatVector) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Skill", "Points"]);
    for (skill, value) in stats.iter() {
        table.add_row(vec![skill.label().to_string(), value.to_string()]);
    }
    table
}

/// Print the prompt and read one trimmed line. `None` on end of input.
fn read_command(reader: &mut impl BufRead, line: &mut String) -> Result<Option<String>, String> {
    print!("> ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    line.clear();
    match reader.read_line(line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(e) => Err(e.to_string()),
    }
}

fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q")
}
