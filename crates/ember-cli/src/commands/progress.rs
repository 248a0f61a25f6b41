use std::path::Path;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use ember_core::{JsonFileStore, Profession, ProgressTracker, dominant_skills};

pub fn show(progress: &Path, seed: u64) -> Result<(), String> {
    let tracker = ProgressTracker::resume(JsonFileStore::new(progress));

    if !tracker.resumed() {
        if progress.exists() {
            println!(
                "  {} {} holds no usable checkpoint; showing a fresh start.",
                "warning:".yellow().bold(),
                progress.display()
            );
        } else {
            println!("  No checkpoint at {}; showing a fresh start.", progress.display());
        }
    }
    println!("  {} {}", "Scene:".bold(), tracker.scene());
    println!("{}", super::stats_table(tracker.stats()));

    if tracker.stats().total() == 0 {
        println!("  Profession: not yet determined");
        return Ok(());
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let profession = Profession::derive(tracker.stats(), &mut rng);
    let tied = dominant_skills(tracker.stats());
    if tied.len() > 1 {
        let labels: Vec<&str> = tied.iter().map(|s| s.label()).collect();
        println!(
            "  Profession: {} (tie between {})",
            profession.to_string().bold(),
            labels.join(", ")
        );
    } else {
        println!("  Profession: {}", profession.to_string().bold());
    }
    Ok(())
}

pub fn reset(progress: &Path) -> Result<(), String> {
    let mut tracker = ProgressTracker::new(JsonFileStore::new(progress));
    if tracker.restart() {
        println!("  Progress reset to scene {}.", tracker.scene());
        Ok(())
    } else {
        Err(format!("could not write '{}'", progress.display()))
    }
}
