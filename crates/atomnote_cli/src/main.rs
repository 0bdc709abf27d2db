//! `atomnote` command line entry point.
//!
//! # Responsibility
//! - Load a TOML catalog and run the generator into a directory.
//! - Print a per-note summary, or the full report as JSON.
//!
//! Exit status: `0` when every note was emitted, `1` on a run-level error,
//! `2` when some notes failed.

use atomnote_core::{
    default_log_level, init_logging, load_catalog, DirectorySink, EmissionSink, GenerateError,
    GenerationPolicy, GenerationReport, MemorySink, NoteGenerator,
};
use clap::{Args, Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "atomnote")]
#[command(about = "Render a catalog of atomic concept notes into markdown files")]
#[command(version)]
struct Cli {
    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every note and write `<title>.md` files into `--out`
    Generate {
        #[command(flatten)]
        run: RunArgs,

        /// Output directory, created when missing
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Render every note in memory and report failures without writing
    Check {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Catalog file with a `[generation]` table and `[[notes]]` entries
    #[arg(short, long)]
    catalog: PathBuf,

    /// Emit nothing when any note fails
    #[arg(long)]
    strict: bool,

    /// Fail notes that reference titles missing from the catalog
    #[arg(long)]
    deny_dangling: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn policy(&self) -> GenerationPolicy {
        GenerationPolicy {
            all_or_nothing: self.strict,
            deny_dangling_links: self.deny_dangling,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    }

    match cli.command {
        Command::Generate { run, out } => execute(&run, Some(out)),
        Command::Check { run } => execute(&run, None),
    }
}

/// Loads the catalog before touching `out`, which is only created once a
/// document is written.
fn execute(run: &RunArgs, out: Option<PathBuf>) -> ExitCode {
    let catalog = match load_catalog(&run.catalog) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("event=catalog_load module=cli status=error error={err}");
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let mut sink: Box<dyn EmissionSink> = match out {
        Some(out) => Box::new(DirectorySink::deferred(out)),
        None => Box::new(MemorySink::new()),
    };
    let generator = NoteGenerator::new(catalog.config, run.policy());
    match generator.generate(&catalog.store, sink.as_mut()) {
        Ok(report) => {
            print_report(&report, run.json);
            if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(GenerateError::Aborted { failures }) => {
            let report = GenerationReport {
                failures,
                ..GenerationReport::default()
            };
            print_report(&report, run.json);
            eprintln!("error: strict run aborted; nothing was written");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn print_report(report: &GenerationReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("error: failed to encode report: {err}"),
        }
        return;
    }

    for file_name in &report.emitted {
        println!("created: {file_name}");
    }
    for failure in &report.failures {
        println!("failed: {} ({})", failure.file_name, failure.reason);
    }
    for link in &report.dangling_links {
        println!("dangling: {} -> [[{}]]", link.source, link.target);
    }
    println!(
        "\ntotal: {} emitted, {} failed",
        report.emitted_count(),
        report.failed_count()
    );
}
