//! Leveled debug messages, assertion support, and the multiple-driver
//! detector.
//!
//! Leveled debug output itself is just `log::{debug, info, warn, error}` —
//! there's no reason to wrap a facade around a facade. This module holds the
//! things spec.md §4 singles out that *aren't* already covered by reaching
//! for `log!` macros directly: the CLI's `-q`/`-d LEVEL` mapping onto
//! `log::LevelFilter`, a formatted-message assertion helper for the
//! "Programmer contract" error class (spec.md §7), and the optional
//! debug-mode "multiple-driver" detector spec.md §9's Open Questions invites.

use log::LevelFilter;

/// The CLI's `-d LEVEL` argument (spec.md §6): `MIN | MED | MAX`, mapped onto
/// `log::LevelFilter` from loosest to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugLevel {
    Min,
    Med,
    Max,
}

impl DebugLevel {
    #[must_use]
    pub fn level_filter(self) -> LevelFilter {
        match self {
            DebugLevel::Min => LevelFilter::Warn,
            DebugLevel::Med => LevelFilter::Info,
            DebugLevel::Max => LevelFilter::Debug,
        }
    }
}

impl std::str::FromStr for DebugLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MIN" => Ok(DebugLevel::Min),
            "MED" => Ok(DebugLevel::Med),
            "MAX" => Ok(DebugLevel::Max),
            other => Err(format!("unknown debug level {other:?} (expected MIN, MED, or MAX)")),
        }
    }
}

/// Initializes the process-wide logger from the CLI's `-q`/`-d` flags
/// (spec.md §6). `-q` forces `Error` (suppress non-fatal diagnostics) and
/// wins over `-d` if both are given; otherwise `debug_level` (default `Warn`,
/// i.e. `-d` not given) sets the filter.
pub fn init_logging(quiet: bool, debug_level: Option<DebugLevel>) {
    let filter = if quiet {
        LevelFilter::Error
    } else {
        debug_level.map_or(LevelFilter::Warn, DebugLevel::level_filter)
    };
    env_logger::Builder::new().filter_level(filter).init();
}

/// Asserts `$cond`, logging at `error` level with a formatted message before
/// panicking if it does not hold.
///
/// Intended for "Programmer contract" violations (spec.md §7): invalid sib
/// encodings, bus misalignment, and the like. Always active, debug or
/// release — use [`sim_debug_assert`] for checks that should compile out of
/// release builds.
#[macro_export]
macro_rules! sim_assert {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            log::error!($($arg)+);
            panic!($($arg)+);
        }
    };
}

/// Like [`sim_assert`], but compiled out entirely when `debug_assertions` is
/// off, matching spec.md §7's "may be checked via assertions in debug
/// builds; release builds may treat as undefined."
#[macro_export]
macro_rules! sim_debug_assert {
    ($cond:expr, $($arg:tt)+) => {
        #[cfg(debug_assertions)]
        $crate::sim_assert!($cond, $($arg)+);
    };
}

/// Tracks, per phase, which registered hook (by index) last wrote each net
/// this cycle, and logs at `debug` level when two distinct hooks write the
/// same net within one phase.
///
/// This is the optional detector from spec.md §9's third Open Question:
/// "Two `setnet` calls to the same net in the same phase are allowed
/// (last-write-wins) ... implementers MAY add an optional debug-mode
/// multiple-driver detector." Only compiled in when `debug_assertions` is on
/// — release builds allocate no tracking table and pay no cost.
#[cfg(debug_assertions)]
#[derive(Default)]
pub struct DriverTracker {
    last_writer: std::collections::HashMap<usize, usize>,
}

#[cfg(debug_assertions)]
impl DriverTracker {
    pub fn reset_for_phase(&mut self) {
        self.last_writer.clear();
    }

    /// Record that `hook_index` wrote `net`. Logs if a different hook wrote
    /// the same net earlier in this phase.
    pub fn record_write(&mut self, net: usize, hook_index: usize) {
        if let Some(&previous) = self.last_writer.get(&net)
            && previous != hook_index
        {
            log::debug!(
                "net {net} driven by hook {previous} and hook {hook_index} in the same phase"
            );
        }
        self.last_writer.insert(net, hook_index);
    }
}
