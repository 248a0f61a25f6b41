//! Terminal runner for a mini-game deck.
//!
//! Each input line is one command. Cipher rounds also accept a bare answer,
//! which is typed and submitted in one go. Indices on the command line are
//! 1-based.

use std::cell::Cell;
use std::io;
use std::path::Path;
use std::thread;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use ember_puzzle::{
    Action, Edit, Event, InputBuffer, Outcome, Phase, PuzzleConfig, PuzzleDeck, PuzzleKind,
    PuzzleSession, Round,
};

pub fn run(dir: &Path, kind: &str, seed: u64, no_delay: bool) -> Result<(), String> {
    let kind: PuzzleKind = kind.parse().map_err(|e: ember_puzzle::PuzzleError| e.to_string())?;
    let deck = super::load_deck(dir, kind)?;
    let config = PuzzleConfig::for_kind(kind).with_seed(seed);

    let completed = Cell::new(None);
    let mut session = PuzzleSession::new(&deck, config)
        .map_err(|e| e.to_string())?
        .with_on_finish(|done| completed.set(Some(done)));

    show_tutorial(&deck);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while let Some(input) = super::read_command(&mut reader, &mut line)? {
        if input.is_empty() {
            continue;
        }
        if super::is_quit(&input) {
            break;
        }
        if input.eq_ignore_ascii_case("help") {
            print_help(kind);
            continue;
        }

        let actions = match parse_command(&input, session.current_round()) {
            Ok(actions) => actions,
            Err(msg) => {
                println!("  {}", msg.yellow());
                continue;
            }
        };
        for action in actions {
            match session.handle(action) {
                Ok(Event::Ignored) => {
                    report(&session, &Event::Ignored);
                    break;
                }
                Ok(event) => report(&session, &event),
                Err(e) => {
                    println!("  {}", e.to_string().yellow());
                    break;
                }
            }
        }
        settle(&mut session, no_delay);
    }

    session.handle(Action::Exit).map_err(|e| e.to_string())?;
    drop(session);
    println!("completed: {}", completed.get().unwrap_or(false));
    Ok(())
}

/// Let pending timed transitions fire, sleeping through them unless told not to.
fn settle(session: &mut PuzzleSession<'_>, no_delay: bool) {
    while let Some(delay) = session.pending_delay() {
        if !no_delay {
            thread::sleep(delay);
        }
        if let Some(event) = session.advance(delay) {
            report(session, &event);
        }
    }
}

fn parse_command(input: &str, round: &Round) -> Result<Vec<Action>, String> {
    let mut words = input.split_whitespace();
    let head = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let action = match head.as_str() {
        "start" => Action::Start,
        "next" => Action::Proceed,
        "hint" => Action::ShowHint,
        "giveup" => Action::GiveUp,
        "submit" | "ok" => Action::Submit,
        "clear" => Action::Edit(Edit::Clear),
        "pick" => Action::Edit(Edit::Pick(index(&args, 0)?)),
        "assign" => Action::Edit(Edit::Assign {
            candidate: index(&args, 0)?,
            slot: index(&args, 1)?,
        }),
        "unassign" => Action::Edit(Edit::Unassign(index(&args, 0)?)),
        "move" => Action::Edit(Edit::Move {
            from: index(&args, 0)?,
            to: index(&args, 1)?,
        }),
        "place" => {
            let Round::Route(r) = round else {
                return Err("'place' only applies to route rounds".into());
            };
            let w = index(&args, 0)?;
            let waypoint = r
                .waypoints
                .get(w)
                .cloned()
                .ok_or_else(|| format!("no waypoint number {}", w + 1))?;
            Action::Edit(Edit::Place {
                waypoint,
                slot: index(&args, 1)?,
            })
        }
        "toggle" => match round {
            Round::BugHunt(_) => Action::Edit(Edit::ToggleLine(index(&args, 0)?)),
            _ if args.is_empty() => return Err("toggle what?".into()),
            _ => Action::Edit(Edit::ToggleService(args.join(" "))),
        },
        _ if matches!(round, Round::Cipher(_)) => {
            return Ok(vec![
                Action::Edit(Edit::Type(input.to_string())),
                Action::Submit,
            ]);
        }
        _ => return Err(format!("unknown command '{head}' (type 'help')")),
    };
    Ok(vec![action])
}

/// The `n`th argument, read as 1-based and returned 0-based.
fn index(args: &[&str], n: usize) -> Result<usize, String> {
    let raw = args.get(n).ok_or("missing number")?;
    match raw.parse::<usize>() {
        Ok(v) if v >= 1 => Ok(v - 1),
        _ => Err(format!("'{raw}' is not a number from 1 up")),
    }
}

fn report(session: &PuzzleSession<'_>, event: &Event) {
    match event {
        Event::RoundStarted { .. } | Event::PhaseChanged(Phase::Active) => show_round(session),
        Event::PhaseChanged(_) | Event::Exited { .. } => {}
        Event::Hint(text) => println!("  {} {text}", "Hint:".yellow().bold()),
        Event::Edited => show_input(session),
        Event::Correct { .. } => println!("  {}", "Correct!".green().bold()),
        Event::Wrong { .. } => {
            println!("  {}", "Wrong.".red().bold());
            if session.explanation_visible() {
                show_explanation(session);
            }
        }
        Event::Finished { outcome, mistakes } => show_result(session, *outcome, *mistakes),
        Event::Ignored => println!("  {}", "(not accepted right now)".dimmed()),
    }
}

fn show_tutorial(deck: &PuzzleDeck) {
    println!("  {}\n", deck.title.bold());
    for line in deck.tutorial.lines() {
        println!("  {line}");
    }
    println!("\n  Type 'start' to begin, 'help' for commands, 'quit' to leave.");
}

fn show_round(session: &PuzzleSession<'_>) {
    match session.phase() {
        Phase::Example => {
            let Some(example) = session.example() else {
                return;
            };
            println!("\n  {}", "Example".bold());
            for line in example.question.lines() {
                println!("    {line}");
            }
            println!("  Answer: {}", example.answer.green());
            println!("  {}", example.explain);
            println!("  Type 'next' to continue.");
        }
        Phase::Active => {
            println!(
                "\n  {} {}/{}",
                "Round".bold(),
                session.round_index() + 1,
                session.deck().len()
            );
            show_body(session);
            show_input(session);
            if let Some(hint) = session.hint() {
                println!("  {} {hint}", "Hint:".yellow().bold());
            }
            if session.explanation_visible() {
                show_explanation(session);
            }
        }
        _ => {}
    }
}

fn show_body(session: &PuzzleSession<'_>) {
    match session.current_round() {
        Round::Cipher(_) => {
            println!("  Cipher: {}", session.ciphertext().unwrap_or_default().bold());
        }
        Round::Anomaly(r) => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["#", "Label", "Value"]);
            for (i, row) in r.rows.iter().enumerate() {
                table.add_row(vec![(i + 1).to_string(), row.label.clone(), row.value.to_string()]);
            }
            println!("{table}");
        }
        Round::Matching(r) => {
            println!("  Candidates:");
            for (i, candidate) in r.candidates.iter().enumerate() {
                println!("    {}. {}", i + 1, candidate.text);
            }
        }
        Round::Route(r) => {
            println!("  Waypoints:");
            for (i, waypoint) in r.waypoints.iter().enumerate() {
                println!("    {}. {waypoint}", i + 1);
            }
        }
        Round::Incident(r) => println!("  {}", r.text),
        Round::Prioritization(_) | Round::BugHunt(_) => {}
    }
}

fn show_input(session: &PuzzleSession<'_>) {
    match (session.current_round(), session.input()) {
        (_, InputBuffer::Text(text)) if !text.is_empty() => println!("  Answer: {text}"),
        (Round::Anomaly(r), InputBuffer::Row(Some(row))) => {
            println!("  Picked: {}", r.rows[*row].label);
        }
        (Round::Matching(r), InputBuffer::Slots(slots)) => {
            for (i, (position, slot)) in r.positions.iter().zip(slots).enumerate() {
                let who = slot.map_or_else(|| "—".to_string(), |c| format!("candidate {}", c + 1));
                println!("    {}. {position}: {who}", i + 1);
            }
        }
        (Round::Prioritization(r), InputBuffer::Order(order)) => {
            for (i, task) in order.iter().enumerate() {
                println!("    {}. {}", i + 1, r.tasks[*task]);
            }
        }
        (Round::Route(r), InputBuffer::Stops(stops)) => {
            let mut path = vec![r.from.clone()];
            path.extend(
                stops
                    .iter()
                    .enumerate()
                    .map(|(i, s)| format!("[{}: {}]", i + 1, s.as_deref().unwrap_or("—"))),
            );
            path.push(r.to.clone());
            println!("  Route: {}", path.join(" → "));
        }
        (Round::Incident(r), InputBuffer::Services(selected)) => {
            let marked: Vec<String> = r
                .services
                .iter()
                .map(|s| format!("[{}] {s}", if selected.contains(s) { "x" } else { " " }))
                .collect();
            println!("  Services: {}", marked.join("  "));
        }
        (Round::BugHunt(r), InputBuffer::Lines(selected)) => {
            for (i, code) in r.lines.iter().enumerate() {
                let mark = if selected.contains(&i) { "x" } else { " " };
                println!("    [{mark}] {code}");
            }
        }
        _ => {}
    }
}

fn show_explanation(session: &PuzzleSession<'_>) {
    if let Some(marks) = session.marks() {
        let row: Vec<String> = marks
            .iter()
            .enumerate()
            .map(|(i, ok)| {
                let mark = if *ok { "✓".green() } else { "✗".red() };
                format!("{} {mark}", i + 1)
            })
            .collect();
        println!("  {}", row.join("  "));
    }
    for line in session.explanation() {
        println!("  {}", line.dimmed());
    }
}

fn show_result(session: &PuzzleSession<'_>, outcome: Outcome, mistakes: u32) {
    match outcome {
        Outcome::Success => println!("\n  {}", "All rounds solved!".green().bold()),
        Outcome::GaveUp => println!("\n  {}", "You gave up.".red().bold()),
        Outcome::Aborted => println!("\n  {}", "Left early.".yellow()),
    }
    println!("  Mistakes: {mistakes}");
    show_explanation(session);
    println!("  Type 'quit' to leave.");
}

fn print_help(kind: PuzzleKind) {
    println!("  start | next | hint | submit | giveup | clear | quit");
    let specific = match kind {
        PuzzleKind::Cipher => "<answer>            type and submit an answer",
        PuzzleKind::Anomaly => "pick <row>          choose the odd row",
        PuzzleKind::Matching => "assign <cand> <pos>  put a candidate on a position; unassign <pos>",
        PuzzleKind::Prioritization => "move <from> <to>    move a task",
        PuzzleKind::Route => "place <waypoint> <slot>  put a waypoint on the route; unassign <slot>",
        PuzzleKind::Incident => "toggle <service>    select or deselect a service",
        PuzzleKind::BugHunt => "toggle <line>       select or deselect a line",
    };
    println!("  {specific}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_puzzle::CipherTransform;
    use ember_puzzle::round::{BugHuntRound, CipherRound, IncidentRound, RouteRound};
    use std::collections::BTreeSet;

    fn incident() -> Round {
        Round::Incident(IncidentRound {
            text: String::new(),
            services: vec!["A".into(), "B".into()],
            root_causes: BTreeSet::from(["B".to_string()]),
            explain: String::new(),
        })
    }

    #[test]
    fn phase_commands() {
        let round = incident();
        assert_eq!(parse_command("start", &round).unwrap(), vec![Action::Start]);
        assert_eq!(parse_command("NEXT", &round).unwrap(), vec![Action::Proceed]);
        assert_eq!(parse_command("giveup", &round).unwrap(), vec![Action::GiveUp]);
        assert!(parse_command("dance", &round).is_err());
    }

    #[test]
    fn indices_are_one_based() {
        let round = incident();
        assert_eq!(
            parse_command("move 2 1", &round).unwrap(),
            vec![Action::Edit(Edit::Move { from: 1, to: 0 })]
        );
        assert!(parse_command("pick 0", &round).is_err());
        assert!(parse_command("pick", &round).is_err());
    }

    #[test]
    fn toggle_depends_on_round() {
        assert_eq!(
            parse_command("toggle B", &incident()).unwrap(),
            vec![Action::Edit(Edit::ToggleService("B".into()))]
        );
        let bugs = Round::BugHunt(BugHuntRound {
            lines: vec!["x".into()],
            buggy: BTreeSet::from([0]),
            explain: String::new(),
        });
        assert_eq!(
            parse_command("toggle 1", &bugs).unwrap(),
            vec![Action::Edit(Edit::ToggleLine(0))]
        );
    }

    #[test]
    fn place_resolves_waypoint_number() {
        let round = Round::Route(RouteRound {
            from: "S".into(),
            to: "E".into(),
            waypoints: vec!["Великий Новгород".into(), "Псков".into()],
            route: vec!["Великий Новгород".into()],
            explain: None,
        });
        assert_eq!(
            parse_command("place 1 1", &round).unwrap(),
            vec![Action::Edit(Edit::Place {
                waypoint: "Великий Новгород".into(),
                slot: 0
            })]
        );
        assert!(parse_command("place 3 1", &round).is_err());
        assert!(parse_command("place 1 1", &incident()).is_err());
    }

    #[test]
    fn bare_text_answers_cipher() {
        let round = Round::Cipher(CipherRound::new("КОД", CipherTransform::Transposition));
        assert_eq!(
            parse_command("код", &round).unwrap(),
            vec![Action::Edit(Edit::Type("код".into())), Action::Submit]
        );
    }
}
