//! The cycle-driven scheduler: [`SimulatorBuilder`] for hook registration,
//! [`Simulator`] for driving cycles.

use std::path::Path;

use sim_core::{NetStore, Sib, StorageWord};

use crate::context::SimContext;
#[cfg(debug_assertions)]
use crate::diagnostics::DriverTracker;
use crate::error::SimError;
use crate::hooks::{Hook, HookTable, Phase, MAX_HOOKS};
use crate::trace::TraceWriter;

const DEFAULT_MAX_CYCLES: u64 = 10;
const DEFAULT_POR_CYCLES: u64 = 2;

/// Registers hooks before a run exists. Dropping this without calling
/// [`Self::build`] simply discards the registered hooks — there is no
/// partial-build state to clean up.
///
/// There is no way to add a hook to a built [`Simulator`]: registration is
/// only possible here, which is spec.md §4.3's "hooks may only be
/// registered during init()" enforced by the type system rather than
/// documented as undefined behavior.
pub struct SimulatorBuilder<W: StorageWord> {
    store: NetStore<W>,
    rising: HookTable<W>,
    high: HookTable<W>,
    falling: HookTable<W>,
    low: HookTable<W>,
    max_cycles: u64,
    por_cycles: u64,
    trace: TraceWriter<W>,
}

impl<W: StorageWord> SimulatorBuilder<W> {
    #[must_use]
    pub fn new(n_nets: usize) -> Self {
        Self {
            store: NetStore::new(n_nets),
            rising: HookTable::new(MAX_HOOKS),
            high: HookTable::new(MAX_HOOKS),
            falling: HookTable::new(MAX_HOOKS),
            low: HookTable::new(MAX_HOOKS),
            max_cycles: DEFAULT_MAX_CYCLES,
            por_cycles: DEFAULT_POR_CYCLES,
            trace: TraceWriter::Disabled,
        }
    }

    #[must_use]
    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    #[must_use]
    pub fn with_por_cycles(mut self, por_cycles: u64) -> Self {
        self.por_cycles = por_cycles;
        self
    }

    /// Enables binary tracing. `trace_path = None` is equivalent to never
    /// calling this method.
    #[must_use]
    pub fn with_trace(mut self, trace_path: Option<&Path>, netlist_path: &Path) -> Self {
        self.trace = TraceWriter::init(trace_path, netlist_path);
        self
    }

    pub fn add_rising_edge_hook(&mut self, hook: Hook<W>) -> Result<(), SimError> {
        Self::register(&mut self.rising, Phase::Rising, hook)
    }

    pub fn add_clock_is_high_hook(&mut self, hook: Hook<W>) -> Result<(), SimError> {
        Self::register(&mut self.high, Phase::High, hook)
    }

    pub fn add_falling_edge_hook(&mut self, hook: Hook<W>) -> Result<(), SimError> {
        Self::register(&mut self.falling, Phase::Falling, hook)
    }

    pub fn add_clock_is_low_hook(&mut self, hook: Hook<W>) -> Result<(), SimError> {
        Self::register(&mut self.low, Phase::Low, hook)
    }

    fn register(table: &mut HookTable<W>, phase: Phase, hook: Hook<W>) -> Result<(), SimError> {
        table.try_push(hook).map_err(|capacity| SimError::HookCapacityExceeded {
            phase,
            registered: table.len(),
            capacity,
        })
    }

    /// Consumes the builder into a runnable [`Simulator`]. Always succeeds —
    /// capacity violations are caught eagerly by the `add_*_hook` calls
    /// above, so there is nothing left to validate here.
    #[must_use]
    pub fn build(self) -> Simulator<W> {
        Simulator {
            store: self.store,
            rising: self.rising,
            high: self.high,
            falling: self.falling,
            low: self.low,
            max_cycles: self.max_cycles,
            por_cycles: self.por_cycles,
            trace: self.trace,
            cycle: 1,
            #[cfg(debug_assertions)]
            driver_tracker: DriverTracker::default(),
        }
    }
}

/// Outcome of a completed [`Simulator::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of whole cycles executed (1-based cycle count, not phases).
    pub cycles_run: u64,
    /// Whether some hook called `SimContext::halt` before `max_cycles` was
    /// reached.
    pub halted: bool,
}

/// A built, runnable simulation. No further hooks can be registered.
pub struct Simulator<W: StorageWord> {
    store: NetStore<W>,
    rising: HookTable<W>,
    high: HookTable<W>,
    falling: HookTable<W>,
    low: HookTable<W>,
    max_cycles: u64,
    por_cycles: u64,
    trace: TraceWriter<W>,
    cycle: u64,
    #[cfg(debug_assertions)]
    driver_tracker: DriverTracker,
}

impl<W: StorageWord> Simulator<W> {
    /// Drives cycles until `cycle > max_cycles` or a hook calls `halt()`,
    /// running phases `Rising -> High -> Falling -> Low` in that fixed order
    /// every cycle (spec.md §4.3), and appending one trace snapshot after
    /// every single hook invocation (spec.md §9, snapshot-granularity
    /// resolution).
    pub fn run(&mut self) -> RunSummary {
        let mut halted = false;
        while self.cycle <= self.max_cycles {
            let por = self.cycle <= self.por_cycles;

            // The pre-hook halt check happens once per cycle, not once per
            // phase (spec.md §4.3, §8 Property 7): a halt requested in any
            // phase still lets the remaining phases of *this* cycle run to
            // completion, and only keeps the *next* cycle from starting.
            let mut cycle_halted = false;
            cycle_halted |= Self::run_phase(
                &mut self.store,
                &mut self.rising,
                &mut self.trace,
                #[cfg(debug_assertions)]
                &mut self.driver_tracker,
                self.cycle,
                Sib::ONE,
                por,
            );
            cycle_halted |= Self::run_phase(
                &mut self.store,
                &mut self.high,
                &mut self.trace,
                #[cfg(debug_assertions)]
                &mut self.driver_tracker,
                self.cycle,
                Sib::ONE,
                por,
            );
            cycle_halted |= Self::run_phase(
                &mut self.store,
                &mut self.falling,
                &mut self.trace,
                #[cfg(debug_assertions)]
                &mut self.driver_tracker,
                self.cycle,
                Sib::ZERO,
                por,
            );
            cycle_halted |= Self::run_phase(
                &mut self.store,
                &mut self.low,
                &mut self.trace,
                #[cfg(debug_assertions)]
                &mut self.driver_tracker,
                self.cycle,
                Sib::ZERO,
                por,
            );

            if cycle_halted {
                halted = true;
                break;
            }

            self.cycle += 1;
        }

        // `self.cycle` still holds the halted cycle's number when `halted`
        // is true (it's only incremented after a cycle runs to completion),
        // so the two branches both read the last cycle actually executed.
        RunSummary {
            cycles_run: if halted { self.cycle } else { self.cycle - 1 },
            halted,
        }
    }

    /// Runs every hook in `table` in registration order, tracing a snapshot
    /// after each one, and reports whether any hook requested a halt. A
    /// requested halt doesn't stop this phase's remaining hooks either — it
    /// only ever stops the *next* cycle from starting (spec.md §4.3 "Early
    /// termination"); the caller accumulates this return value across all
    /// four phases before deciding whether to keep going.
    #[allow(clippy::too_many_arguments)]
    fn run_phase(
        store: &mut NetStore<W>,
        table: &mut HookTable<W>,
        trace: &mut TraceWriter<W>,
        #[cfg(debug_assertions)] driver_tracker: &mut DriverTracker,
        cycle: u64,
        clk: Sib,
        por: bool,
    ) -> bool {
        #[cfg(debug_assertions)]
        driver_tracker.reset_for_phase();

        let mut halted = false;
        for (index, hook) in table.iter_mut().enumerate() {
            #[cfg(debug_assertions)]
            let mut ctx = SimContext::new_tracked(store, cycle, clk, por, driver_tracker, index);
            #[cfg(not(debug_assertions))]
            let mut ctx = SimContext::new(store, cycle, clk, por);

            hook(&mut ctx);
            halted |= ctx.halt_requested();

            trace.write_trace(store);
        }
        halted
    }

    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    #[must_use]
    pub fn store(&self) -> &NetStore<W> {
        &self.store
    }

    /// Direct mutable access to the net store, for seeding initial state in
    /// tests or tooling before calling [`Self::run`]. Not something hooks
    /// themselves ever need — they go through [`SimContext`] instead.
    pub fn store_mut(&mut self) -> &mut NetStore<W> {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::Sib;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn property_9_runs_exactly_four_n_hook_invocations_with_no_halt() {
        let count = Rc::new(RefCell::new(0u64));
        let mut builder: SimulatorBuilder<u64> = SimulatorBuilder::new(8).with_max_cycles(5);

        // One counting hook per phase, so each of the 4 phases contributes
        // exactly one invocation per cycle.
        let c1 = count.clone();
        builder
            .add_rising_edge_hook(Box::new(move |_ctx| *c1.borrow_mut() += 1))
            .unwrap();
        let c2 = count.clone();
        builder
            .add_clock_is_high_hook(Box::new(move |_ctx| *c2.borrow_mut() += 1))
            .unwrap();
        let c3 = count.clone();
        builder
            .add_falling_edge_hook(Box::new(move |_ctx| *c3.borrow_mut() += 1))
            .unwrap();
        let c4 = count.clone();
        builder
            .add_clock_is_low_hook(Box::new(move |_ctx| *c4.borrow_mut() += 1))
            .unwrap();

        let mut sim = builder.build();
        let summary = sim.run();

        assert!(!summary.halted);
        assert_eq!(summary.cycles_run, 5);
        assert_eq!(*count.borrow(), 4 * 5);
    }

    #[test]
    fn halt_finishes_the_current_cycle_but_stops_the_next_one_from_starting() {
        // Scenario E (spec.md §8): a hook registered in rising_edge calls
        // halt(); the current cycle still runs clock_is_high, falling_edge,
        // and clock_is_low, and the following cycle never starts.
        let phases_run = Rc::new(RefCell::new(Vec::new()));

        let mut builder: SimulatorBuilder<u64> = SimulatorBuilder::new(4).with_max_cycles(10);
        builder
            .add_rising_edge_hook(Box::new(|ctx| ctx.halt()))
            .unwrap();
        let p = phases_run.clone();
        builder
            .add_clock_is_high_hook(Box::new(move |_ctx| p.borrow_mut().push("high")))
            .unwrap();
        let p = phases_run.clone();
        builder
            .add_falling_edge_hook(Box::new(move |_ctx| p.borrow_mut().push("falling")))
            .unwrap();
        let p = phases_run.clone();
        builder
            .add_clock_is_low_hook(Box::new(move |_ctx| p.borrow_mut().push("low")))
            .unwrap();

        let mut sim = builder.build();
        let summary = sim.run();

        assert!(summary.halted);
        assert_eq!(summary.cycles_run, 1);
        assert_eq!(*phases_run.borrow(), vec!["high", "falling", "low"]);
    }

    #[test]
    fn clock_net_state_is_correct_in_each_phase() {
        let seen_in_rising = Rc::new(RefCell::new(None));
        let seen_in_falling = Rc::new(RefCell::new(None));

        let mut builder: SimulatorBuilder<u64> = SimulatorBuilder::new(4).with_max_cycles(1);
        let sr = seen_in_rising.clone();
        builder
            .add_rising_edge_hook(Box::new(move |ctx| *sr.borrow_mut() = Some(ctx.get_clk())))
            .unwrap();
        let sf = seen_in_falling.clone();
        builder
            .add_falling_edge_hook(Box::new(move |ctx| *sf.borrow_mut() = Some(ctx.get_clk())))
            .unwrap();

        builder.build().run();

        assert_eq!(*seen_in_rising.borrow(), Some(Sib::ONE));
        assert_eq!(*seen_in_falling.borrow(), Some(Sib::ZERO));
    }
}
