//! Balance simulator CLI.
//!
//! Plays seeded campaigns with the autopilot and prints aggregate results.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 100 runs
//!   cargo run --bin simulate -- -n 500 --seed 42  # Reproducible batch
//!   RUST_LOG=debug cargo run --bin simulate -- -n 1

use mecha_delver::simulator::{run_simulation, SimConfig};
use mecha_delver::utils::build_info::version_string;
use std::env;
use tracing_subscriber::EnvFilter;

struct CliOptions {
    config: SimConfig,
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let CliOptions { config, json } = parse_args(&args);

    if config.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              MECHA DELVER BALANCE SIMULATOR                   ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Max Turns:      {}", config.max_turns_per_run);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    if json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", report.to_text());
    }
}

fn parse_args(args: &[String]) -> CliOptions {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(config.num_runs);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--max-turns" => {
                if i + 1 < args.len() {
                    config.max_turns_per_run =
                        args[i + 1].parse().unwrap_or(config.max_turns_per_run);
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "--json" => {
                json = true;
                config.verbosity = 0;
            }
            "-V" | "--version" => {
                println!("{}", version_string());
                std::process::exit(0);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    CliOptions { config, json }
}

fn print_help() {
    println!("Mecha Delver Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulated campaigns (default: 100)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -t, --max-turns <T>   Turn limit per run (default: 10,000)");
    println!("    -v, --verbose         Print every run");
    println!("    -q, --quiet           Only print the report");
    println!("    --json                Print the report as JSON");
    println!("    -V, --version         Show version");
    println!("    -h, --help            Show this help");
    println!();
    println!("Diagnostic logging goes to stderr and is controlled by RUST_LOG (default: warn).");
}
