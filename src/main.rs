// Command-line entry point for SharpCraft.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sharpcraft::api::dto::{complexity_report, return_null_report};
use sharpcraft::application::introspection::{order_complexity, order_return_null};
use sharpcraft::application::{Converter, Introspection};
use sharpcraft::infrastructure::{init_thread_pool, CSharpParser, CancellationToken, Config};
use sharpcraft::ports::json_exporter::JsonExporter;
use sharpcraft::ports::ReportExporter;
use tracing::{error, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: ./sharpcraft.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Scan worker threads (0: half the cores)
    #[arg(long, global = true)]
    workers: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate C# source to VB.NET
    Convert {
        /// Input file, or `-` for standard input
        #[arg(default_value = "-")]
        input: String,

        /// Rename an identifier, FROM=TO (repeatable)
        #[arg(long = "map", value_parser = parse_mapping)]
        map: Vec<(String, String)>,

        /// Write multi-line verbatim strings as XML literals
        #[arg(long)]
        convert_strings: bool,

        /// Fail on parser diagnostics
        #[arg(long)]
        strict: bool,

        /// Output file (default: standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report methods above a decision-point threshold
    Complexity {
        /// .sln, .csproj or directory
        solution: PathBuf,

        #[arg(long)]
        max_complexity: Option<usize>,

        /// Scan time budget in seconds
        #[arg(long)]
        timeout: Option<u64>,

        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report `return null` / `return default(T)` statements
    ReturnNull {
        solution: PathBuf,

        /// Skip `default(T)` of resolved value types
        #[arg(long)]
        semantic: bool,

        #[arg(long)]
        timeout: Option<u64>,

        #[arg(short, long)]
        output: Option<String>,
    },
}

fn parse_mapping(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => Ok((from.to_string(), to.to_string())),
        _ => Err(format!("expected FROM=TO, got `{s}`")),
    }
}

fn main() -> ExitCode {
    sharpcraft::init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::discover(cli.config.as_deref())?;
    if let Some(workers) = cli.workers {
        config.scan.workers = workers;
    }
    let parser = CSharpParser::with_symbols(config.parser.preprocessor_symbols.clone());

    match cli.command {
        Command::Convert { input, map, convert_strings, strict, output } => {
            let text = if input == "-" {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text).context("Failed to read standard input")?;
                text
            } else {
                fs::read_to_string(&input).with_context(|| format!("Failed to read {input}"))?
            };
            let mut options = config.convert;
            options.identifier_map.extend(map);
            options.convert_strings |= convert_strings;
            options.strict |= strict;

            let vb = Converter::new(parser, options).convert(&text)?;
            match output {
                Some(path) => fs::write(&path, vb + "\n").with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{vb}"),
            }
        }
        Command::Complexity { solution, max_complexity, timeout, output } => {
            start_pool(config.scan.workers);
            let max = max_complexity.unwrap_or(config.scan.max_complexity);
            let token = token(timeout, &config);
            let records = Introspection::new(Arc::new(parser)).search_for_complex_methods(&solution, max, &token)?;
            if records.is_empty() {
                warn!(max, "no method exceeded the threshold");
            }
            JsonExporter.export(&complexity_report(order_complexity(records)), output.as_deref())?;
        }
        Command::ReturnNull { solution, semantic, timeout, output } => {
            start_pool(config.scan.workers);
            let token = token(timeout, &config);
            let introspection = Introspection::new(Arc::new(parser));
            let records = if semantic {
                introspection.search_for_return_null_statements_semantic(&solution, &token)?
            } else {
                introspection.search_for_return_null_statements(&solution, &token)?
            };
            JsonExporter.export(&return_null_report(order_return_null(records)), output.as_deref())?;
        }
    }
    Ok(())
}

fn start_pool(workers: usize) {
    if let Err(e) = init_thread_pool(workers) {
        warn!("thread pool already initialized: {e}");
    }
}

/// A zero budget means no deadline.
fn token(timeout: Option<u64>, config: &Config) -> CancellationToken {
    let budget = timeout.map(Duration::from_secs).unwrap_or_else(|| config.scan.timeout());
    if budget.is_zero() {
        CancellationToken::new()
    } else {
        CancellationToken::with_timeout(budget)
    }
}
