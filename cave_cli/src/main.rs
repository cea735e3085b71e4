//! Cave Escape in the terminal.
//!
//! Reads one command per line from stdin and prints the resulting events, either as the
//! stock English text or as one JSON object per line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use cave_engine::{OutputEvent, Session};
use cave_rules::{CommandTable, ConfigError, GameConfig};
use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Find the key, reach the exit, and stay away from the monster.
#[derive(Parser, Debug)]
#[command(name = "cave")]
#[command(author, version, about = "Cave Escape - dig for the key in the dark", long_about = None)]
struct Args {
    /// Seed for loot rolls and hints (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// TOML file overriding the grid layout, starting kit, hints or loot table
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// TOML file replacing the command vocabulary
    #[arg(long = "commands")]
    commands: Option<PathBuf>,

    /// Print events as JSON lines instead of text
    #[arg(long = "json")]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

fn main() {
    init_tracing();

    let args = Args::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = run(&args, stdin.lock(), stdout.lock()) {
        eprintln!("cave: {}", err);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with game output. Filter with `RUST_LOG`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: &Args, input: impl BufRead, mut output: impl Write) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    let commands = match &args.commands {
        Some(path) => CommandTable::from_path(path)?,
        None => CommandTable::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random::<u64>);

    let mut session = Session::with_seed(config, commands, seed)?;
    info!(session = %session.id(), seed, "starting");
    emit(&mut output, session.history(), args.json)?;

    for line in input.lines() {
        let step = session.handle_input(&line?);
        emit(&mut output, &step.events, args.json)?;
        if session.is_terminated() {
            break;
        }
    }

    output.flush()?;
    Ok(())
}

fn emit(output: &mut impl Write, events: &[OutputEvent], json: bool) -> Result<(), CliError> {
    for event in events {
        if json {
            writeln!(output, "{}", serde_json::to_string(event)?)?;
        } else {
            writeln!(output, "{}", event)?;
        }
    }
    Ok(())
}
