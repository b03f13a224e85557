//! Seqdiff CLI
//!
//! Compares two files line by line or as whole strings. Exits with 0 when the
//! inputs match, 1 when they differ and 2 on errors.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use seqdiff::infrastructure::{config::Settings, telemetry::TelemetryBuilder};
use seqdiff::reconcile::reconcile;
use seqdiff::report::{
    describe_list_differences, describe_updates, expected_but_was, expected_but_was_verbatim,
};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "seqdiff", version)]
#[command(about = "Seqdiff - explain how two sequences differ", long_about = None)]
struct Cli {
    /// TOML settings file, layered over the defaults
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Shortest edit script between the lines of two files
    Lines(PairArgs),
    /// Positional update operations turning OLD's lines into NEW's
    Reconcile(ReconcileArgs),
    /// Bracket the differing part of two files' contents
    Text(TextArgs),
}

#[derive(Debug, Args)]
struct PairArgs {
    /// File holding the expected (old) content
    old: PathBuf,
    /// File holding the actual (new) content
    new: PathBuf,
}

#[derive(Debug, Args)]
struct ReconcileArgs {
    #[command(flatten)]
    files: PairArgs,
    /// Report moved lines as a removal plus an insertion
    #[arg(long)]
    no_moves: bool,
    /// Print the operations as JSON
    #[arg(long)]
    json: bool,
    /// Lines are `KEY<SEP>CONTENT`; lines with equal keys are the same item
    #[arg(long, value_name = "SEP")]
    key_separator: Option<String>,
}

#[derive(Debug, Args)]
struct TextArgs {
    #[command(flatten)]
    files: PairArgs,
    /// Shared characters kept on each side of the difference
    #[arg(long, value_name = "N")]
    max_context: Option<usize>,
}

/// Whether the compared inputs matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Same,
    Different,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(Outcome::Same) => ExitCode::SUCCESS,
        Ok(Outcome::Different) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    TelemetryBuilder::new("seqdiff")
        .with_settings(&settings.telemetry)
        .init()?;
    debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Lines(args) => lines(&args),
        Commands::Reconcile(args) => reconcile_lines(&args, &settings),
        Commands::Text(args) => text(&args, &settings),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_pair(args: &PairArgs) -> Result<(String, String)> {
    Ok((read(&args.old)?, read(&args.new)?))
}

fn lines(args: &PairArgs) -> Result<Outcome> {
    let (old, new) = read_pair(args)?;
    let old: Vec<&str> = old.lines().collect();
    let new: Vec<&str> = new.lines().collect();

    if old == new {
        return Ok(Outcome::Same);
    }
    println!("{}", describe_list_differences(&old, &new));
    Ok(Outcome::Different)
}

fn reconcile_lines(args: &ReconcileArgs, settings: &Settings) -> Result<Outcome> {
    let (old, new) = read_pair(&args.files)?;
    let old: Vec<&str> = old.lines().collect();
    let new: Vec<&str> = new.lines().collect();
    let detect_moves = settings.reconcile.detect_moves && !args.no_moves;

    let separator = args.key_separator.as_deref();
    let result = reconcile(
        &old,
        &new,
        |a, b| item_key(a, separator) == item_key(b, separator),
        |a, b| a == b,
        detect_moves,
    );
    let ops = result.updates();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ops).context("Failed to serialize operations")?
        );
    } else if !ops.is_empty() {
        println!("{}", describe_updates(&ops));
    }
    Ok(if ops.is_empty() {
        Outcome::Same
    } else {
        Outcome::Different
    })
}

/// The part of `line` that identifies it; the whole line without a separator.
fn item_key<'a>(line: &'a str, separator: Option<&str>) -> &'a str {
    separator
        .and_then(|sep| line.split_once(sep))
        .map_or(line, |(key, _)| key)
}

fn text(args: &TextArgs, settings: &Settings) -> Result<Outcome> {
    let (old, new) = read_pair(&args.files)?;
    if old == new {
        return Ok(Outcome::Same);
    }
    let max_context = args.max_context.unwrap_or(settings.text.max_context);
    let message = if settings.text.render_whitespace {
        expected_but_was(&old, &new, max_context)
    } else {
        expected_but_was_verbatim(&old, &new, max_context)
    };
    println!("expected{message}");
    Ok(Outcome::Different)
}
