//! numdrill CLI — the session controller and terminal front end.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "numdrill", version, about = "Timed arithmetic drill")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a timed drill in the terminal
    Play {
        /// Time budget in seconds (overrides config)
        #[arg(long)]
        duration: Option<u32>,

        /// Seed for a reproducible sequence of problems
        #[arg(long)]
        seed: Option<u64>,

        /// Write a JSON summary of the session to this path
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print generated problems without playing
    Generate {
        /// Number of problems
        #[arg(long, default_value = "10")]
        count: usize,

        /// Seed for a reproducible sequence of problems
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Show the hidden value next to each problem
        #[arg(long)]
        answers: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check one answer against an explicit problem
    ///
    /// Exits 0 when correct, 3 when incorrect, 2 when the answer is not a number.
    Check {
        /// Operation: add, subtract, multiply, divide, power, root, modulo (or its symbol)
        #[arg(long)]
        op: String,

        #[arg(short, long, allow_hyphen_values = true)]
        a: i64,

        #[arg(short, long, allow_hyphen_values = true)]
        b: i64,

        #[arg(short, long, allow_hyphen_values = true)]
        result: i64,

        /// Hidden term: a, b, result
        #[arg(long, default_value = "result")]
        missing: String,

        /// The learner's answer
        #[arg(long, allow_hyphen_values = true)]
        answer: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the operation table with weights and selection probabilities
    Operations {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter numdrill.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("numdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            duration,
            seed,
            summary,
            config,
        } => commands::play::execute(duration, seed, summary, config)
            .await
            .map(|()| 0),
        Commands::Generate {
            count,
            seed,
            format,
            answers,
            config,
        } => commands::generate::execute(count, seed, format, answers, config).map(|()| 0),
        Commands::Check {
            op,
            a,
            b,
            result,
            missing,
            answer,
            config,
        } => commands::check::execute(op, a, b, result, missing, answer, config),
        Commands::Operations { config } => commands::operations::execute(config).map(|()| 0),
        Commands::Init => commands::init::execute().map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
