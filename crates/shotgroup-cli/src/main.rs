//! shotgroup CLI: replay an edit session over a detection response.
//!
//! Reads a detection-service response from disk, optionally replays an
//! edit script against it, prints the group summary and writes the
//! corrected training result as JSON.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use nalgebra::Point2;

use shotgroup::{DetectionSource, EditSession, JsonFileSink, JsonFileSource, ResultSink};
use shotgroup_core::EditMode;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "shotgroup")]
#[command(about = "Analyze and correct AI-detected bullet holes on paper targets")]
#[command(version)]
struct Cli {
    /// Verbose diagnostics on stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an edit session over a detection response and report the group.
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Clone, Args)]
struct AnalyzeArgs {
    /// Path to the detection response (JSON).
    #[arg(long)]
    detections: PathBuf,

    /// Optional edit script replayed before reporting.
    ///
    /// One command per line: `mode add|remove`, `tap X Y` (canvas
    /// coordinates), `add X Y` (image coordinates), `remove INDEX`.
    /// Blank lines and `#` comments are skipped.
    #[arg(long)]
    edits: Option<PathBuf>,

    /// Side of the square display canvas in pixels.
    #[arg(long, default_value = "1000.0")]
    canvas: f64,

    /// Path to write the corrected training result (JSON).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(thiserror::Error, Debug)]
enum ScriptError {
    #[error("line {line}: unknown command {command:?}")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: expected {expected}")]
    BadArguments { line: usize, expected: &'static str },
}

/// One parsed edit-script command.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Edit {
    Mode(EditMode),
    Tap(f64, f64),
    Add(f64, f64),
    Remove(usize),
}

fn parse_script(text: &str) -> Result<Vec<Edit>, ScriptError> {
    let mut edits = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        let edit = match command {
            "mode" => match rest.as_slice() {
                ["add"] => Edit::Mode(EditMode::Add),
                ["remove"] => Edit::Mode(EditMode::Remove),
                _ => {
                    return Err(ScriptError::BadArguments {
                        line,
                        expected: "mode add|remove",
                    })
                }
            },
            "tap" | "add" => {
                let (x, y) = match rest.as_slice() {
                    [x, y] => match (x.parse::<f64>(), y.parse::<f64>()) {
                        (Ok(x), Ok(y)) => (x, y),
                        _ => {
                            return Err(ScriptError::BadArguments {
                                line,
                                expected: "two numeric coordinates",
                            })
                        }
                    },
                    _ => {
                        return Err(ScriptError::BadArguments {
                            line,
                            expected: "two numeric coordinates",
                        })
                    }
                };
                if command == "tap" {
                    Edit::Tap(x, y)
                } else {
                    Edit::Add(x, y)
                }
            }
            "remove" => match rest.as_slice() {
                [i] => match i.parse::<usize>() {
                    Ok(i) => Edit::Remove(i),
                    Err(_) => {
                        return Err(ScriptError::BadArguments {
                            line,
                            expected: "a mark index",
                        })
                    }
                },
                _ => {
                    return Err(ScriptError::BadArguments {
                        line,
                        expected: "a mark index",
                    })
                }
            },
            other => {
                return Err(ScriptError::UnknownCommand {
                    line,
                    command: other.to_string(),
                })
            }
        };
        edits.push(edit);
    }
    Ok(edits)
}

fn apply_edits(session: &mut EditSession, edits: &[Edit]) {
    for edit in edits {
        match *edit {
            Edit::Mode(mode) => session.set_mode(mode),
            Edit::Tap(x, y) => {
                session.tap(Point2::new(x, y));
            }
            Edit::Add(x, y) => {
                // Image-space convenience: route through the canvas so the
                // normal tap path is exercised.
                let canvas_pt = session.transform().to_canvas(Point2::new(x, y));
                let mode = session.mode();
                session.set_mode(EditMode::Add);
                session.tap(canvas_pt);
                session.set_mode(mode);
            }
            Edit::Remove(index) => {
                let mode = session.mode();
                session.set_mode(EditMode::Remove);
                session.tap_marker(index);
                session.set_mode(mode);
            }
        }
    }
}

fn run_analyze(args: &AnalyzeArgs) -> CliResult<()> {
    let response = JsonFileSource::new(&args.detections).detect(Path::new("captured"))?;
    let mut session = EditSession::from_response(&response, args.canvas);
    log::info!("seeded {} detections", session.shots().len());

    if let Some(script_path) = &args.edits {
        let script = std::fs::read_to_string(script_path)?;
        let edits = parse_script(&script)?;
        apply_edits(&mut session, &edits);
        log::info!("replayed {} edits", edits.len());
    }

    let summary = session.summary();
    println!("holes: {}", summary.total);
    println!(
        "tiers: {} manual / {} high / {} medium / {} low",
        summary.tiers.manual, summary.tiers.high, summary.tiers.medium, summary.tiers.low
    );
    match session.analysis() {
        Some(analysis) => {
            println!("group size: {:.1} px", analysis.widest.distance_px);
            println!("tightest pair: {:.1} px", analysis.tightest.distance_px);
            if let (Some(cm), Some(quality)) = (summary.group_size_cm, summary.quality) {
                println!("group size: {:.1} cm ({})", cm, quality.label());
            }
        }
        None => println!("group size: not enough holes"),
    }

    if let Some(out) = &args.out {
        JsonFileSink::new(out).store(&session.result(), None)?;
        println!("result written to {}", out.display());
    }
    Ok(())
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    shotgroup_core::init_with_level(level)?;

    match &cli.command {
        Commands::Analyze(args) => run_analyze(args),
    }
}
