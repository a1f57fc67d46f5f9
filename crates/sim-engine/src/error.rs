//! Terminal error type for the simulator.
//!
//! The spec's Design Notes call for replacing the C source's `exit()` calls
//! with "a result-returning top-level `run()` that maps fatal conditions to a
//! terminal error variant" (spec.md §9). Only conditions spec.md §7 actually
//! classifies as fatal end up here — the "Configuration" category (a missing
//! netlist, an unwritable trace path) is handled entirely inside
//! [`crate::trace::TraceWriter`] by self-disabling and logging, never by
//! returning an error.

use thiserror::Error;

/// A fatal condition, reported once to the diagnostic stream and mapped to a
/// nonzero process exit code by the caller.
#[derive(Debug, Error)]
pub enum SimError {
    /// A phase's hook array would exceed `MAX_HOOKS` (spec.md §4.3, §7
    /// "Capacity").
    #[error("hook capacity exceeded: phase {phase:?} already has {registered} of {capacity} hooks registered")]
    HookCapacityExceeded {
        phase: crate::hooks::Phase,
        registered: usize,
        capacity: usize,
    },

    /// Malformed CLI invocation (unknown option, bad `-d` level, etc.).
    #[error("invalid command line: {0}")]
    InvalidCliArgs(String),
}
