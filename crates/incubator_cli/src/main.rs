//! Inspection CLI for incubator projections.
//!
//! # Responsibility
//! - Load backend JSON records from disk and print derived timelines,
//!   boards and status buckets.
//! - Exercise `incubator_core` wiring without a UI.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use incubator_core::{
    build_timeline_at, classify, classify_raw, default_log_level, group_by_status, init_logging,
    Board, Classify, Document, Experiment, LoggingConfig, StatusDomain, StatusKeyed, Task,
};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "incubator_cli", version)]
#[command(about = "Inspect contract timelines and startup boards")]
struct Args {
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; file logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the signing timeline of a document JSON file
    Timeline {
        path: PathBuf,
        /// Date for synthetic events (RFC 3339); defaults to the wall clock
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Print a kanban board from a JSON array of tasks or experiments
    Board { kind: BoardKind, path: PathBuf },
    /// Classify a raw status string
    Classify {
        /// signatory|document|task|experiment
        domain: String,
        raw: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BoardKind {
    Tasks,
    Experiments,
}

trait Titled {
    fn title(&self) -> &str;
}

impl Titled for Task {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for Experiment {
    fn title(&self) -> &str {
        &self.title
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(&LoggingConfig::new(level, log_dir)).map_err(|err| anyhow!(err))?;
    }

    match args.command {
        Command::Timeline { path, now } => print_timeline(&path, now, args.json),
        Command::Board { kind, path } => match kind {
            BoardKind::Tasks => {
                let tasks: Vec<Task> = load(&path)?;
                print_board(&group_by_status(&tasks), args.json)
            }
            BoardKind::Experiments => {
                let experiments: Vec<Experiment> = load(&path)?;
                print_board(&group_by_status(&experiments), args.json)
            }
        },
        Command::Classify { domain, raw } => {
            let domain = StatusDomain::parse(&domain)
                .ok_or_else(|| anyhow!("unknown status domain `{domain}`"))?;
            let bucket = classify_raw(domain, &raw);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&bucket)?);
            } else {
                println!("{} ({:?}) key={}", bucket.label, bucket.tone, bucket.key);
            }
            Ok(())
        }
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in `{}`", path.display()))
}

fn print_timeline(path: &Path, now: Option<DateTime<Utc>>, json: bool) -> Result<()> {
    let document: Document = load(path)?;
    if let Err(err) = document.validate() {
        eprintln!("warning: {err}");
        warn!(
            "event=document_validate module=cli status=error document={} error={}",
            document.id,
            err
        );
    }

    let timeline = build_timeline_at(&document, now.unwrap_or_else(Utc::now));
    info!(
        "event=cli_timeline module=cli status=ok document={} events={}",
        document.id,
        timeline.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline.events)?);
        return Ok(());
    }

    let status = classify(document.derived_status());
    let (signed, total) = document.signing_progress();
    println!("{} [{}] {signed}/{total} signed", document.title, status.label);
    for event in &timeline.events {
        let marker = if event.is_current {
            ">"
        } else if event.is_completed {
            "x"
        } else {
            " "
        };
        println!(
            "  [{marker}] {}  {}  {}",
            event.date.to_rfc3339(),
            event.title,
            event.description
        );
    }
    if timeline.skipped_signatures > 0 {
        println!(
            "  ({} signature(s) without a signing date omitted)",
            timeline.skipped_signatures
        );
    }
    Ok(())
}

fn print_board<T>(board: &Board<'_, T>, json: bool) -> Result<()>
where
    T: StatusKeyed + Titled + Serialize,
    T::Status: Classify,
{
    if json {
        let columns: Vec<_> = board
            .columns()
            .iter()
            .map(|column| {
                serde_json::json!({
                    "column": classify(column.status),
                    "items": column.items,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&columns)?);
        return Ok(());
    }

    for column in board.columns() {
        let bucket = classify(column.status);
        println!("{} ({})", bucket.label, column.items.len());
        for item in &column.items {
            println!("  - {}", item.title());
        }
    }
    Ok(())
}
