//! The `numdrill play` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::mpsc;

use numdrill_core::config::load_config_from;
use numdrill_core::report::SessionSummary;
use numdrill_core::session::{Countdown, Outcome, Session, Tick};
use numdrill_core::{Generator, Problem};

use super::make_rng;

pub async fn execute(
    duration: Option<u32>,
    seed: Option<u64>,
    summary_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(secs) = duration {
        config.session.duration_secs = secs;
        config.check().context("invalid --duration")?;
    }

    let generator = Generator::from_config(&config)?;
    let validator = config.validator()?;
    let mut countdown = config.countdown();
    let mut rng = make_rng(seed);
    let mut session = Session::new();
    let started_at = Utc::now();

    println!(
        "{} seconds on the clock. Fill in the blank and press Enter.",
        config.session.duration_secs
    );

    let mut answers = spawn_stdin_reader();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    ticker.tick().await;

    let mut problem = generator.generate(&mut rng);
    prompt(&problem, &countdown, &session)?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match countdown.tick() {
                    Tick::Expired => {
                        println!("\nTime's up!");
                        break;
                    }
                    Tick::Warning if countdown.remaining() == config.session.warning_secs => {
                        println!("\n{} seconds left!", countdown.remaining());
                        prompt(&problem, &countdown, &session)?;
                    }
                    _ => {}
                }
            }
            line = answers.recv() => {
                let Some(line) = line else {
                    tracing::debug!("stdin closed, ending session early");
                    println!();
                    break;
                };
                let line = line.context("failed to read answer")?;

                let verdict = validator.validate(&problem, &line);
                match session.record(&problem, &verdict) {
                    Outcome::Retry => {
                        if let Some(e) = &verdict.input_error {
                            println!("{e}");
                        }
                    }
                    Outcome::Correct => {
                        println!("Correct! +{}", verdict.score_delta);
                        problem = generator.generate(&mut rng);
                    }
                    Outcome::Incorrect => {
                        println!("Incorrect. The answer was {}", verdict.expected_display);
                        problem = generator.generate(&mut rng);
                    }
                }
                prompt(&problem, &countdown, &session)?;
            }
        }
    }

    let finished_at = Utc::now();
    tracing::info!(
        score = session.score,
        correct = session.correct,
        incorrect = session.incorrect,
        "session finished"
    );
    print_summary(&session);

    if let Some(path) = summary_path {
        let summary =
            SessionSummary::new(&session, started_at, finished_at, config.session.duration_secs);
        summary.save_json(&path)?;
        eprintln!("Summary saved to: {}", path.display());
    }

    Ok(())
}

/// Read stdin on a dedicated thread; the channel closes at end of input.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn prompt(problem: &Problem, countdown: &Countdown, session: &Session) -> Result<()> {
    let clock = match countdown.status() {
        Tick::Warning => format!("{}s!", countdown.remaining()),
        _ => format!("{}s", countdown.remaining()),
    };
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "[{clock} | score {}] {problem}  > ", session.score)?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(session: &Session) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Operation", "Correct", "Incorrect", "Accuracy"]);
    for (kind, tally) in &session.by_operation {
        let accuracy = f64::from(tally.correct) * 100.0 / f64::from(tally.total().max(1));
        table.add_row(vec![
            Cell::new(format!("{} {kind}", kind.symbol())),
            Cell::new(tally.correct),
            Cell::new(tally.incorrect),
            Cell::new(format!("{accuracy:.0}%")),
        ]);
    }

    println!("Final score: {}", session.score);
    println!(
        "Correct: {}  Incorrect: {}  Accuracy: {}%",
        session.correct,
        session.incorrect,
        session.accuracy()
    );
    if !session.by_operation.is_empty() {
        println!("\n{table}");
    }
}
