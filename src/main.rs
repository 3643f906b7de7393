//! Flow-Synth: synthetic netflow generator.
//!
//! Produces a time-ordered table of flow records (timestamp, source and
//! destination address, protocol, bytes, packets) whose per-minute volume
//! follows an empirical 24-hour traffic curve instead of a flat rate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌────────────┐   ┌─────────┐
//! │  Window  │──>│ Sampler  │──>│ Allocator │──>│ Timestamps │──>│ Records │──> CSV / JSON / DOT
//! │ (phase)  │   │ (curve)  │   │ (counts)  │   │  (jitter)  │   │(fields) │
//! └──────────┘   └──────────┘   └───────────┘   └────────────┘   └─────────┘
//! ```
//!
//! - **Window**: aligns the requested start with the 11:00 anchor of the curve
//! - **Allocator**: turns relative intensity into integer records per minute,
//!   rejecting requests too sparse to look realistic
//! - **Timestamps**: spreads each minute's records uniformly inside the minute
//! - **UI**: optional terminal chart of the allocation

mod allocator;
mod config;
mod curve;
mod error;
mod export;
mod records;
mod sampler;
mod simulator;
mod timestamps;
mod ui;
mod window;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::error::SimulationError;
use crate::export::{
    default_file_name, export_dot, export_records, export_summary_json, export_summary_text,
    OutputFormat,
};
use crate::simulator::{SimulationPlan, Simulator};
use crate::ui::run_viewer;

/// Flow-Synth: synthetic netflow records shaped by a daily traffic curve.
#[derive(Parser, Debug)]
#[command(name = "flow-synth")]
#[command(version = "0.1.0")]
#[command(about = "Generate synthetic netflow data following an empirical 24-hour traffic curve")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that plans a window.
#[derive(Args, Debug)]
struct WindowArgs {
    /// Window start (e.g. "23/6/2020 11:00" or "2020-06-23 11:00").
    #[arg(short, long)]
    start: Option<String>,

    /// Window end; a trailing partial minute is dropped.
    #[arg(short, long)]
    end: Option<String>,

    /// Total number of records requested for the window.
    #[arg(short, long)]
    total: Option<u64>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging (writes to stderr).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate flow records and write them to a file.
    Generate {
        #[command(flatten)]
        window: WindowArgs,

        /// Number of distinct IP addresses in the pool.
        #[arg(short, long)]
        ips: Option<usize>,

        /// RNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: csv, json, jsonl.
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (default: derived from the window).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the address graph as Graphviz DOT.
        #[arg(long)]
        graph: Option<PathBuf>,

        /// Show the distribution chart after generating.
        #[arg(long)]
        plot: bool,

        /// Fail instead of asking for a larger total.
        #[arg(long)]
        no_prompt: bool,
    },

    /// Show how records would be allocated, without generating them.
    Inspect {
        #[command(flatten)]
        window: WindowArgs,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,

        /// Show the distribution chart.
        #[arg(long)]
        plot: bool,
    },

    /// Print the default configuration file.
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            window,
            ips,
            seed,
            format,
            output,
            graph,
            plot,
            no_prompt,
        } => {
            init_logging(window.verbose, plot)?;

            let mut config = load_config(&window)?;
            if let Some(ips) = ips {
                config.generator.ip_pool_size = ips;
            }
            if seed.is_some() {
                config.generator.seed = seed;
            }
            if let Some(format) = format {
                config.output.format = format
                    .parse::<OutputFormat>()
                    .map_err(anyhow::Error::msg)?;
            }
            if let Some(output) = output {
                config.output.file = Some(output.display().to_string());
            }
            if let Some(graph) = graph {
                config.output.graph = Some(graph.display().to_string());
            }

            let interactive = !no_prompt && io::stdin().is_terminal();
            run_generate(&config, interactive, plot)
        }

        Commands::Inspect { window, json, plot } => {
            init_logging(window.verbose, plot)?;
            let config = load_config(&window)?;
            run_inspect(&config, json, plot)
        }

        Commands::InitConfig => {
            print!("{}", Config::generate_default());
            Ok(())
        }
    }
}

/// Installs the stderr log subscriber, unless the viewer will own the terminal.
fn init_logging(verbose: bool, viewer: bool) -> Result<()> {
    if viewer {
        return Ok(());
    }
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Loads the config file (if any) and applies window overrides.
///
/// An explicit `--config` that cannot be read or parsed stops the run.
fn load_config(args: &WindowArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(start) = &args.start {
        config.window.start = start.clone();
    }
    if let Some(end) = &args.end {
        config.window.end = end.clone();
    }
    if let Some(total) = args.total {
        config.generator.total_records = total;
    }
    Ok(config)
}

fn run_generate(config: &Config, interactive: bool, plot: bool) -> Result<()> {
    let simulator = Simulator::new(config).context("Invalid simulation settings")?;
    info!("Simulating {}", simulator.window());

    let plan = plan(&simulator, config.generator.total_records, interactive)?;

    let seed = config.generator.seed.unwrap_or_else(rand::random::<u64>);
    info!("Using seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let simulation = simulator.generate(plan, &mut rng);

    let format = config.output.format;
    let path = config
        .output
        .file
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default_file_name(&simulator.window(), format)));
    export_records(&path, &simulation.records, format)?;
    info!(
        "Wrote {} records between {} addresses to {} ({})",
        simulation.records.len(),
        simulation.pool.len(),
        path.display(),
        format
    );

    if let Some(graph) = &config.output.graph {
        let graph_path = PathBuf::from(graph);
        export_dot(&graph_path, &simulation.records)?;
        info!("Wrote address graph to {}", graph_path.display());
    }

    print!("{}", export_summary_text(&simulation.plan));

    if plot {
        run_viewer(simulation.plan)?;
    }
    Ok(())
}

fn run_inspect(config: &Config, json: bool, plot: bool) -> Result<()> {
    let simulator = Simulator::new(config).context("Invalid simulation settings")?;
    let plan = plan(&simulator, config.generator.total_records, false)?;

    if plot {
        return run_viewer(plan);
    }

    if json {
        println!("{}", export_summary_json(&plan));
    } else {
        print!("{}", export_summary_text(&plan));
    }
    Ok(())
}

/// Plans the window, asking for a larger total on stdin when allowed.
fn plan(simulator: &Simulator, total: u64, interactive: bool) -> Result<SimulationPlan> {
    let result = if interactive {
        simulator.plan_with_retry(total, prompt_for_total)
    } else {
        simulator.plan(total)
    };
    result.context("Could not allocate records for the window")
}

/// Asks the user for a replacement total after a density failure.
fn prompt_for_total(err: &SimulationError) -> Option<u64> {
    let minimum = err.minimum_total()?;
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        eprint!(
            "Too few records to simulate this window. Enter a total of at least {} (blank to abort): ",
            minimum
        );
        let _ = io::stderr().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }

        let input = line.trim();
        if input.is_empty() {
            return None;
        }
        match input.parse::<u64>() {
            Ok(total) => return Some(total),
            Err(_) => warn!("'{}' is not a whole number", input),
        }
    }
}
