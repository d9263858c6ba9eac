//! lfsr-sweep CLI
//!
//! Usage:
//!   lfsr-sweep                                  # classic run: 16 bits, seed 0x0af0
//!   lfsr-sweep --seed 0xa --width 4             # small register
//!   lfsr-sweep --collision prefix --quiet       # summary only
//!   lfsr-sweep --json --report out/run.json     # JSON lines + saved report

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lfsr_sweep::config::SweepConfig;
use lfsr_sweep::core::{save_report, RunReport, StepObserver, TapSweeper};
use lfsr_sweep::types::{AdvanceOutput, CollisionRule, StepView, SweepError, SweepSummary, TapRule};
use lfsr_sweep::{DEFAULT_WIDTH, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "lfsr-sweep",
    version = VERSION,
    about = "Sweep every tap pair of a Fibonacci LFSR and checksum its feedback history",
    long_about = "Clocks a bit register through its full 2^L state space for each tap pair,\n\
                  records every feedback bit per register length, reports registers that\n\
                  reproduce a recorded stream, and reduces the history into a checksum.\n\n\
                  Tap order:\n  \
                  tap A climbs from 0 to L-1, then tap B descends to 0.\n  \
                  The register is reseeded after every tap pair."
)]
struct Args {
    /// Initial register contents (decimal, 0x hex or 0b binary), bit i → cell i
    #[arg(short, long, default_value = "0x0af0", value_parser = parse_seed)]
    seed: u64,

    /// Register length in bits (1-64)
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// First tap A (default 0)
    #[arg(long, requires = "tap_b")]
    tap_a: Option<usize>,

    /// First tap B (default width - 1)
    #[arg(long, requires = "tap_a")]
    tap_b: Option<usize>,

    /// Collision rule: exact or prefix
    #[arg(long, default_value = "exact")]
    collision: CollisionRule,

    /// Tap collision rule while tap A climbs: equal or modulo
    #[arg(long, default_value = "equal")]
    tap_rule: TapRule,

    /// Do not capture register snapshots
    #[arg(long)]
    no_clock: bool,

    /// Stop after this many tap pairs
    #[arg(long)]
    max_pairs: Option<u64>,

    /// Sleep this many milliseconds after every printed step
    #[arg(long)]
    pace_ms: Option<u64>,

    /// Only print collisions and the summary
    #[arg(short, long)]
    quiet: bool,

    /// Output as JSON lines
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Write a run report to this path
    #[arg(long)]
    report: Option<String>,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the run output
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn run(args: &Args) -> Result<(), SweepError> {
    let config = build_config(args);
    let mut sweeper = TapSweeper::new(config)?;

    let mut console = ConsoleObserver {
        quiet: args.quiet,
        json: args.json,
        color: !args.no_color,
        pace: args.pace_ms.map(Duration::from_millis),
    };

    if !args.json {
        println!("Using initial state: {}", args.seed);
    }

    let summary = sweeper.run(&mut console)?;
    print_summary(&summary, args)?;

    if let Some(path) = &args.report {
        let report = RunReport::from_sweep(&sweeper)?;
        let saved = save_report(&report, path)?;
        if !args.json {
            println!("Report saved: {}", saved.display());
        }
    }

    Ok(())
}

fn build_config(args: &Args) -> SweepConfig {
    let mut config = SweepConfig::new(args.seed, args.width)
        .with_collision_rule(args.collision)
        .with_tap_rule(args.tap_rule)
        .with_clock_capture(!args.no_clock);
    if let (Some(a), Some(b)) = (args.tap_a, args.tap_b) {
        config = config.with_taps(a, b);
    }
    if let Some(limit) = args.max_pairs {
        config = config.with_max_pairs(limit);
    }
    config
}

/// Parse decimal, `0x` hex or `0b` binary
fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim().replace('_', "");
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2)
    } else {
        s.parse::<u64>()
    };
    parsed.map_err(|e| format!("invalid seed '{}': {}", s, e))
}

fn print_summary(summary: &SweepSummary, args: &Args) -> Result<(), SweepError> {
    if args.json {
        println!("{}", serde_json::to_string(&Event::Summary(summary))?);
    } else if args.no_color {
        println!("{}", summary.to_parseable_string());
    } else {
        println!("{}", summary.to_terminal_string());
    }
    Ok(())
}

/// JSON-lines event envelope
#[derive(serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Step(&'a StepView<'a>),
    Collision(&'a StepView<'a>),
    Advance(&'a AdvanceOutput),
    Summary(&'a SweepSummary),
}

/// Prints progress to stdout; pacing here never affects the sweep
struct ConsoleObserver {
    quiet: bool,
    json: bool,
    color: bool,
    pace: Option<Duration>,
}

impl ConsoleObserver {
    fn emit(&self, event: &Event<'_>) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!("failed to encode event: {e}"),
        }
    }
}

impl StepObserver for ConsoleObserver {
    fn on_step(&mut self, view: &StepView<'_>) {
        if self.quiet {
            return;
        }
        if self.json {
            self.emit(&Event::Step(view));
        } else if self.color {
            println!("{}", view.to_terminal_string());
        } else {
            println!("{}", view.to_parseable_string());
        }
        if let Some(pace) = self.pace {
            std::thread::sleep(pace);
        }
    }

    fn on_collision(&mut self, view: &StepView<'_>) {
        if self.json {
            self.emit(&Event::Collision(view));
        } else if self.color {
            println!("{}", colored::Colorize::red(view.to_collision_string().as_str()));
        } else {
            println!("{}", view.to_collision_string());
        }
    }

    fn on_advance(&mut self, advance: &AdvanceOutput) {
        if self.quiet {
            return;
        }
        if self.json {
            self.emit(&Event::Advance(advance));
        } else if self.color {
            println!("{}", advance.to_terminal_string());
        } else {
            println!("{}", advance.to_parseable_string());
        }
    }
}
