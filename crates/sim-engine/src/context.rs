//! The per-cycle handle hooks use to read and write nets, read the clock and
//! POR window, and request a halt.
//!
//! Hooks never see the [`crate::scheduler::Simulator`] or its `NetStore`
//! directly — they borrow a `&mut SimContext` for the duration of a single
//! call, which is the seam spec.md §4.3 draws between "scheduler internals"
//! and "component logic."

use sim_core::{NetStore, Sib, StorageWord};

#[cfg(debug_assertions)]
use crate::diagnostics::DriverTracker;

/// Net-store access, clock/POR state, and halt signaling for one hook call.
pub struct SimContext<'a, W: StorageWord> {
    store: &'a mut NetStore<W>,
    cycle: u64,
    clk: Sib,
    por: bool,
    halt_requested: bool,
    #[cfg(debug_assertions)]
    tracker: Option<(&'a mut DriverTracker, usize)>,
}

impl<'a, W: StorageWord> SimContext<'a, W> {
    pub(crate) fn new(store: &'a mut NetStore<W>, cycle: u64, clk: Sib, por: bool) -> Self {
        Self {
            store,
            cycle,
            clk,
            por,
            halt_requested: false,
            #[cfg(debug_assertions)]
            tracker: None,
        }
    }

    /// Like [`Self::new`], but wired to a [`DriverTracker`] so writes made
    /// through this context are recorded under `hook_index`. Debug builds
    /// only — see spec.md §9's optional multiple-driver detector.
    #[cfg(debug_assertions)]
    pub(crate) fn new_tracked(
        store: &'a mut NetStore<W>,
        cycle: u64,
        clk: Sib,
        por: bool,
        tracker: &'a mut DriverTracker,
        hook_index: usize,
    ) -> Self {
        Self {
            store,
            cycle,
            clk,
            por,
            halt_requested: false,
            tracker: Some((tracker, hook_index)),
        }
    }

    /// Reads a single net.
    #[must_use]
    pub fn get_net(&self, s: usize) -> Sib {
        self.store.get_net(s)
    }

    /// Writes a single net. Last writer within a phase wins (spec.md §9).
    pub fn set_net(&mut self, s: usize, v: Sib) {
        self.store.set_net(s, v);
        self.record_write(s);
    }

    /// Reads a `w`-sib bus starting at net `s`. `s..s+w` must lie within one
    /// storage word (spec.md §3 "Bus alignment").
    #[must_use]
    pub fn get_bus(&self, s: usize, w: usize) -> u64 {
        self.store.get_bus(s, w)
    }

    /// Writes a `w`-sib bus starting at net `s`.
    pub fn set_bus(&mut self, s: usize, w: usize, v: u64) {
        self.store.set_bus(s, w, v);
        for net in s..s + w {
            self.record_write(net);
        }
    }

    /// Reads `w` sibs starting at net `s` from a hook-owned word array
    /// rather than the shared net store (spec.md §4.1). Sequential elements
    /// use this, paired with [`Self::set_n`], to hold their own private
    /// next-state in storage the closure captures, not in the main store —
    /// the Rust-native replacement for the C source's function-local
    /// `static` arrays (spec.md §9).
    #[must_use]
    pub fn get_n(sym: &[W], s: usize, w: usize) -> u64 {
        sim_core::get_n(sym, s, w)
    }

    /// Writes `w` sibs starting at net `s` into a hook-owned word array. See
    /// [`Self::get_n`].
    pub fn set_n(sym: &mut [W], s: usize, w: usize, v: u64) {
        sim_core::set_n(sym, s, w, v);
    }

    #[cfg(debug_assertions)]
    fn record_write(&mut self, net: usize) {
        if let Some((tracker, hook_index)) = &mut self.tracker {
            tracker.record_write(net, *hook_index);
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn record_write(&mut self, _net: usize) {}

    /// The scalar clock net's current value (spec.md §5): `0` during LOW and
    /// FALLING, `1` during RISING and HIGH.
    #[must_use]
    pub fn get_clk(&self) -> Sib {
        self.clk
    }

    /// Whether this cycle falls within the configured power-on-reset window
    /// (spec.md §5). Components that implement synchronous reset read this
    /// on their RISING hook.
    #[must_use]
    pub fn get_por(&self) -> bool {
        self.por
    }

    #[must_use]
    pub fn get_gnd(&self) -> Sib {
        Sib::ZERO
    }

    #[must_use]
    pub fn get_vcc(&self) -> Sib {
        Sib::ONE
    }

    /// The 1-based cycle number currently executing.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Requests that the run loop stop. Takes effect at the next phase
    /// boundary (before the next phase's hooks run), never mid-phase
    /// (spec.md §4.3 "Early termination").
    pub fn halt(&mut self) {
        self.halt_requested = true;
    }

    pub(crate) fn halt_requested(&self) -> bool {
        self.halt_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::NetStore;

    #[test]
    fn net_and_bus_round_trip_through_context() {
        let mut store: NetStore<u64> = NetStore::new(8);
        let mut ctx = SimContext::new(&mut store, 1, Sib::ZERO, false);

        ctx.set_net(0, Sib::ONE);
        assert_eq!(ctx.get_net(0), Sib::ONE);

        ctx.set_bus(4, 4, 0b1011);
        assert_eq!(ctx.get_bus(4, 4), 0b1011);
    }

    #[test]
    fn get_n_set_n_operate_on_a_hook_owned_array_not_the_shared_store() {
        let mut private = [0u64; 1];
        SimContext::<u64>::set_n(&mut private, 0, 4, 0b1010);
        assert_eq!(SimContext::<u64>::get_n(&private, 0, 4), 0b1010);

        let mut store: NetStore<u64> = NetStore::new(8);
        assert_eq!(store.get_bus(0, 4), 0);
    }

    #[test]
    fn halt_is_recorded_but_does_not_panic_or_stop_immediately() {
        let mut store: NetStore<u64> = NetStore::new(1);
        let mut ctx = SimContext::new(&mut store, 1, Sib::ZERO, false);
        assert!(!ctx.halt_requested());
        ctx.halt();
        assert!(ctx.halt_requested());
    }

    #[test]
    fn clk_and_por_reflect_constructor_arguments() {
        let mut store: NetStore<u64> = NetStore::new(1);
        let ctx = SimContext::new(&mut store, 3, Sib::ONE, true);
        assert_eq!(ctx.get_clk(), Sib::ONE);
        assert!(ctx.get_por());
        assert_eq!(ctx.cycle(), 3);
    }
}
