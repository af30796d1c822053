//! starpilot: run the autonomous pilot against the headless harness.
//!
//! Usage:
//!   starpilot --ticks 3600 --seed 7
//!   starpilot --config pilot.json --realtime
//!
//! Prints a JSON run summary on stdout. Logging goes to stderr and is
//! controlled by `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use starpilot_ai::PilotConfig;
use starpilot_app::game_loop;
use starpilot_sim::engine::SimConfig;

/// Default run length: one minute of play.
const DEFAULT_TICKS: u64 = 3600;

struct Args {
    ticks: u64,
    seed: Option<u64>,
    config: Option<PathBuf>,
    realtime: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return;
    }

    if let Err(err) = run(&args) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "starpilot: autonomous pilot demo\n\
         \n\
           --ticks <N>       Ticks to run (default: {DEFAULT_TICKS})\n\
           --seed <N>        RNG seed (default: 42)\n\
           --config <path>   Pilot config JSON; missing fields take defaults\n\
           --realtime        Pace the run at the nominal tick rate\n\
         \n\
         Examples:\n\
         \n\
           starpilot --ticks 7200 --seed 7\n\
           RUST_LOG=starpilot_ai=debug starpilot --config pilot.json\n"
    );
}

fn run(raw: &[String]) -> Result<()> {
    let args = parse_args(raw)?;

    let mut config = SimConfig::default();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(path) = &args.config {
        config.pilot = load_pilot_config(path)?;
    }

    let summary = game_loop::run(config, args.ticks, args.realtime).context("simulation failed")?;
    let json = serde_json::to_string_pretty(&summary).context("failed to encode run summary")?;
    println!("{json}");
    Ok(())
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut args = Args {
        ticks: DEFAULT_TICKS,
        seed: None,
        config: None,
        realtime: false,
    };

    let mut iter = raw.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--ticks" => {
                let value = iter.next().context("--ticks needs a value")?;
                args.ticks = value
                    .parse()
                    .with_context(|| format!("invalid --ticks value: {value}"))?;
            }
            "--seed" => {
                let value = iter.next().context("--seed needs a value")?;
                args.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid --seed value: {value}"))?,
                );
            }
            "--config" => {
                let value = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(value));
            }
            "--realtime" => args.realtime = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn load_pilot_config(path: &Path) -> Result<PilotConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: PilotConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse pilot config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("rejected pilot config {}", path.display()))?;
    Ok(config)
}
