//! Command-line driver for the WUT-4 gate-level simulator (spec.md §6).
//!
//! Wires the CLI's `-q`/`-d LEVEL` flags to [`sim_engine::init_logging`],
//! builds a [`SimulatorBuilder`] for the reference "generated contract"
//! netlist (`netlist::init`, standing in for the schematic transpiler's
//! output per spec.md §4.6), drives it to completion, and maps the result to
//! a process exit code.

mod netlist;

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;

use sim_engine::{DebugLevel, SimError, SimulatorBuilder};

/// WUT-4 four-state gate-level simulator.
#[derive(Parser, Debug)]
#[command(name = "sim-cli", about = "WUT-4 gate-level digital logic simulator")]
struct Cli {
    /// Netlist CSV copied verbatim into the trace file prelude (spec.md §4.4).
    netlist: PathBuf,

    /// Binary trace output path. Omitting it disables tracing without error.
    trace: Option<PathBuf>,

    /// Suppress non-fatal diagnostics (forces the `Error` log level).
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable debug output at the given level: MIN, MED, or MAX.
    #[arg(short = 'd', long = "debug", value_name = "LEVEL")]
    debug_level: Option<String>,

    /// Number of cycles to run before stopping (spec.md §4.3 default: 10).
    #[arg(long, default_value_t = 10)]
    max_cycles: u64,

    /// Length of the power-on-reset window in cycles (spec.md §3 default: 2).
    #[arg(long, default_value_t = 2)]
    por_cycles: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let debug_level = match parse_debug_level(cli.debug_level.as_deref()) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("sim-cli: {e}");
            return ExitCode::FAILURE;
        }
    };
    sim_engine::init_logging(cli.quiet, debug_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("sim-cli: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Parses `-d LEVEL`. A level is only meaningful when debug output is
/// compiled in; a release build without it treats `-d` as a warning rather
/// than a fatal error (spec.md §6).
fn parse_debug_level(raw: Option<&str>) -> Result<Option<DebugLevel>, SimError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    DebugLevel::from_str(raw)
        .map(Some)
        .map_err(SimError::InvalidCliArgs)
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let mut builder: SimulatorBuilder<u64> = SimulatorBuilder::new(netlist::N_NETS)
        .with_max_cycles(cli.max_cycles)
        .with_por_cycles(cli.por_cycles)
        .with_trace(cli.trace.as_deref(), &cli.netlist);

    netlist::init(&mut builder)?;

    let mut sim = builder.build();
    let summary = sim.run();
    log::info!(
        "ran {} cycle(s){}",
        summary.cycles_run,
        if summary.halted { " (halted)" } else { "" }
    );

    Ok(())
}
