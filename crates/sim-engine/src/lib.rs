//! The cycle-driven scheduler: hooks, the simulation context, trace output,
//! and the combinational/sequential gate helpers built on `sim_core`.
//!
//! `sim-core` stays a `no_std` leaf with no notion of time or I/O; this
//! crate is where a netlist becomes a running simulation — `SimulatorBuilder`
//! for registering hooks, `Simulator::run` for driving cycles, `TraceWriter`
//! for recording them.

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod gates;
pub mod hooks;
pub mod scheduler;
pub mod trace;

pub use context::SimContext;
pub use diagnostics::{init_logging, DebugLevel};
pub use error::SimError;
pub use hooks::{Hook, HookTable, Phase, MAX_HOOKS};
pub use scheduler::{RunSummary, Simulator, SimulatorBuilder};
pub use trace::TraceWriter;
