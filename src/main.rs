//! Searchkit -- solves a medal quest layout and reports the plan as JSON.
//!
//! Usage:
//!   searchkit <LAYOUT-FILE> [OPTIONS]
//!
//! Options:
//!   --algorithm A   bfs, ucs or astar (default: astar)
//!   --heuristic H   null, single, better or gen (default: null)
//!   --costs N,S,E,W per-direction step costs (default: 1,1,1,1)
//!   --config FILE   JSON solver configuration; flags override it
//!   --log LEVEL     tracing filter when RUST_LOG is unset (default: warn)

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use searchkit::config::{self, Algorithm, Report, SolveConfig};
use searchkit::quest::{DirectionCosts, QuestProblem};
use searchkit::search::HeuristicKind;

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Command-line flags that override the loaded configuration.
#[derive(Default)]
struct Overrides {
    algorithm: Option<Algorithm>,
    heuristic: Option<HeuristicKind>,
    costs: Option<DirectionCosts>,
    log_level: Option<String>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut layout_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut overrides = Overrides::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--algorithm" => {
                i += 1;
                let value = flag_value(&args, i, "--algorithm");
                overrides.algorithm = Some(
                    Algorithm::from_name(value)
                        .unwrap_or_else(|| fail(&format!("unknown algorithm: {}", value))),
                );
            }
            "--heuristic" => {
                i += 1;
                let value = flag_value(&args, i, "--heuristic");
                overrides.heuristic = Some(
                    HeuristicKind::from_name(value)
                        .unwrap_or_else(|| fail(&format!("unknown heuristic: {}", value))),
                );
            }
            "--costs" => {
                i += 1;
                let value = flag_value(&args, i, "--costs");
                overrides.costs = Some(
                    DirectionCosts::from_list(value)
                        .unwrap_or_else(|| fail(&format!("invalid costs: {}", value))),
                );
            }
            "--config" => {
                i += 1;
                config_path = Some(flag_value(&args, i, "--config").to_string());
            }
            "--log" => {
                i += 1;
                overrides.log_level = Some(flag_value(&args, i, "--log").to_string());
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
            path => {
                if layout_path.is_some() {
                    fail("only one layout file may be given");
                }
                layout_path = Some(path.to_string());
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => SolveConfig::from_path(&path)
            .unwrap_or_else(|e| fail(&format!("{}: {}", path, e))),
        None => SolveConfig::default(),
    };
    if let Some(algorithm) = overrides.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(heuristic) = overrides.heuristic {
        config.heuristic = heuristic;
    }
    if let Some(costs) = overrides.costs {
        config.costs = costs;
    }
    if let Some(level) = overrides.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level);

    let Some(layout_path) = layout_path else {
        print_usage();
        process::exit(1);
    };
    let text = fs::read_to_string(&layout_path)
        .unwrap_or_else(|e| fail(&format!("{}: {}", layout_path, e)));
    let problem: QuestProblem = text
        .parse()
        .unwrap_or_else(|e| fail(&format!("{}: {}", layout_path, e)));

    let report = Report::new(config.algorithm, config::solve(&problem, &config));
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = serde_json::to_writer(&mut out, &report)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(out));
    if let Err(e) = written {
        fail(&format!("failed to write output: {}", e));
    }
}

/// Returns the argument following a flag, exiting if it is missing.
fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => fail(&format!("{} needs a value", flag)),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: searchkit <LAYOUT-FILE> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --algorithm A   bfs, ucs or astar (default: astar)");
    eprintln!("  --heuristic H   null, single, better or gen (default: null)");
    eprintln!("  --costs N,S,E,W Per-direction step costs (default: 1,1,1,1)");
    eprintln!("  --config FILE   JSON solver configuration; flags override it");
    eprintln!("  --log LEVEL     Tracing filter when RUST_LOG is unset (default: warn)");
    eprintln!("  --help          Show this help");
}
