use std::io;
use std::path::Path;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use ember_core::{JsonFileStore, Profession, ProgressTracker};
use ember_dialog::{DialogSession, Step};

pub fn run(dir: &Path, npc: &str, progress: &Path, seed: u64) -> Result<(), String> {
    let tree = super::load_dialog(dir, npc)?;
    let mut tracker = ProgressTracker::resume(JsonFileStore::new(progress));
    let mut rng = StdRng::seed_from_u64(seed);
    let profession = Profession::derive(tracker.stats(), &mut rng);
    let mut session = DialogSession::start(&tree, *tracker.stats()).with_profession(profession);

    println!("  {} {}", "Talking to".bold(), tree.npc.name);
    println!("  Choose a reply by number, 'quit' to leave.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while let Some(node) = session.current_node() {
        println!("{}: {}", tree.npc.name.bold(), node.text);
        for visible in session.visible_options() {
            let label = session.render_label(visible.option);
            if visible.satisfied {
                println!("  {}. {label}", visible.index + 1);
            } else {
                let lock = format!("({}, недостаточно)", visible.option.requires);
                println!(
                    "  {}. {} {}",
                    visible.index + 1,
                    label.dimmed(),
                    lock.dimmed()
                );
            }
        }

        let Some(input) = super::read_command(&mut reader, &mut line)? else {
            break;
        };
        if input.is_empty() {
            continue;
        }
        if super::is_quit(&input) {
            break;
        }
        let Ok(position) = input.parse::<usize>() else {
            println!("{}\n", "Enter the number of a reply.".yellow());
            continue;
        };

        match session.quick_select(position) {
            Ok(Some(Step::Continue(_))) => println!(),
            Ok(Some(Step::Ended(_))) => {}
            Ok(None) => println!("{}\n", format!("No reply number {position}.").yellow()),
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
    }

    if !session.is_finished() {
        println!("\n  Conversation left unfinished; progress unchanged.");
        return Ok(());
    }

    let gained = session.stats().total() - tracker.stats().total();
    tracker.set_stats(*session.stats());
    println!("\n  {} (+{gained})", "Conversation over".bold());
    println!("{}", super::stats_table(tracker.stats()));

    let scene = tracker.scene();
    match tracker.checkpoint(scene) {
        Ok(true) => println!("  Progress saved to {}", progress.display()),
        Ok(false) => println!("  {}", "Progress could not be saved.".yellow()),
        Err(e) => return Err(e.to_string()),
    }
    Ok(())
}
