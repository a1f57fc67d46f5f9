//! Combinational gate helpers and the sequential-element hook factory.
//!
//! These are thin adapters between [`SimContext`] net access and
//! `sim_core::logic`'s lookup tables — the kind of small glue a generated
//! netlist consumer would otherwise have to write out by hand for every
//! instance.

use sim_core::{logic, Sib, StorageWord};

use crate::context::SimContext;
use crate::hooks::Hook;

/// Reads `a` and `b`, writes `AND(a, b)` to `out`.
pub fn and_gate<W: StorageWord>(ctx: &mut SimContext<'_, W>, a: usize, b: usize, out: usize) {
    let v = logic::and(ctx.get_net(a), ctx.get_net(b));
    ctx.set_net(out, v);
}

/// Reads `a` and `b`, writes `OR(a, b)` to `out`.
pub fn or_gate<W: StorageWord>(ctx: &mut SimContext<'_, W>, a: usize, b: usize, out: usize) {
    let v = logic::or(ctx.get_net(a), ctx.get_net(b));
    ctx.set_net(out, v);
}

/// Reads `a` and `b`, writes `XOR(a, b)` to `out`.
pub fn xor_gate<W: StorageWord>(ctx: &mut SimContext<'_, W>, a: usize, b: usize, out: usize) {
    let v = logic::xor(ctx.get_net(a), ctx.get_net(b));
    ctx.set_net(out, v);
}

/// Reads `a`, writes `NOT(a)` to `out`.
pub fn not_gate<W: StorageWord>(ctx: &mut SimContext<'_, W>, a: usize, out: usize) {
    let v = logic::not(ctx.get_net(a));
    ctx.set_net(out, v);
}

/// Reads `a`, writes `XOR(a, VCC)` to `out` — a dedicated gate with one
/// input tied high, the literal topology of spec.md §8 Scenario C's U2
/// gates rather than a `not_gate` standing in for it.
pub fn xor_vcc_gate<W: StorageWord>(ctx: &mut SimContext<'_, W>, a: usize, out: usize) {
    let v = logic::xor(ctx.get_net(a), ctx.get_vcc());
    ctx.set_net(out, v);
}

/// Builds a rising-edge hook for an `n`-sib synchronous register: on POR it
/// loads `reset_value`, otherwise it latches `data_in` to `data_out`.
///
/// `Q` (`data_out`) lives in the shared net store, so other hooks can read
/// it combinationally before the next rising edge; this hook itself is
/// stateless (it just samples `data_in` each cycle). A register whose `D`
/// input is *not* already fully combinational — e.g. one computing its own
/// next-state from private storage — would instead hold that state in the
/// closure's capture and use [`SimContext::get_n`]/[`SimContext::set_n`] on
/// it, the Rust-native replacement for the C source's function-local
/// `static` arrays (spec.md §9 Design Notes).
#[must_use]
pub fn register<W: StorageWord>(
    data_in: usize,
    data_out: usize,
    width: usize,
    reset_value: u64,
) -> Hook<W> {
    Box::new(move |ctx: &mut SimContext<'_, W>| {
        let next = if ctx.get_por() {
            reset_value
        } else {
            ctx.get_bus(data_in, width)
        };
        ctx.set_bus(data_out, width, next);
    })
}
