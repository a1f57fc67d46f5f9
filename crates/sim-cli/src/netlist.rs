//! Reference "generated contract": the hand-written stand-in for a schematic
//! transpiler's output (the transpiler itself is out of scope).
//!
//! Implements Scenario C from the simulator's test matrix: a 4-bit register
//! `R` reset to `0x3` on power-on, whose `D` input is driven by four XOR
//! gates that each XOR VCC with the corresponding `Q` bit. Net positions are
//! `const` items, the direct analogue of the generated `NAME_POS`/`NAME_SZ`
//! macros a real transpiler would emit.

use sim_core::StorageWord;
use sim_engine::gates::xor_vcc_gate;
use sim_engine::{RunSummary, SimError, Simulator, SimulatorBuilder};

/// The 4-bit register `R`, nets `[REG_POS, REG_POS + REG_WIDTH)`.
pub const REG_POS: usize = 0;
pub const REG_WIDTH: usize = 4;

/// `D[i] = Q[i] XOR VCC`, latched into `REG` on the same rising edge.
pub const NEXT_POS: usize = REG_POS + REG_WIDTH;
pub const NEXT_WIDTH: usize = REG_WIDTH;

pub const N_NETS: usize = NEXT_POS + NEXT_WIDTH;

/// Power-on-reset value of `R` (spec.md §8 Scenario C).
pub const RESET_VALUE: u64 = 0x3;

/// Netlist CSV prelude written verbatim into the trace file header
/// (spec.md §4.4).
pub const NETLIST_CSV: &str = "name,pos,width\nreg,0,4\nnext,4,4\n";

/// Registers the register's hooks on `builder`.
///
/// Two rising-edge hooks, run in this order every cycle:
/// 1. four XOR-with-VCC gates, one per bit, computing `next[i] = reg[i]
///    XOR VCC`;
/// 2. latch `reg = next`, or `reg = RESET_VALUE` during the POR window.
pub fn init<W: StorageWord>(builder: &mut SimulatorBuilder<W>) -> Result<(), SimError> {
    builder.add_rising_edge_hook(Box::new(|ctx| {
        for bit in 0..REG_WIDTH {
            xor_vcc_gate(ctx, REG_POS + bit, NEXT_POS + bit);
        }
    }))?;

    builder.add_rising_edge_hook(sim_engine::gates::register(
        NEXT_POS,
        REG_POS,
        REG_WIDTH,
        RESET_VALUE,
    ))?;

    Ok(())
}

/// Builds and runs the register for `max_cycles` cycles with a `por_cycles`
/// power-on-reset window, returning the run summary.
pub fn run<W: StorageWord>(
    max_cycles: u64,
    por_cycles: u64,
) -> Result<(Simulator<W>, RunSummary), SimError> {
    let mut builder: SimulatorBuilder<W> = SimulatorBuilder::new(N_NETS)
        .with_max_cycles(max_cycles)
        .with_por_cycles(por_cycles);
    init(&mut builder)?;
    let mut sim = builder.build();
    let summary = sim.run();
    Ok((sim, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Scenario C (spec.md §8): `R` resets to `0x3`, and each rising edge
    // outside the POR window latches `NOT(R)` (XOR with VCC, bitwise, since
    // VCC is always 1) back into `R`. With `por_cycles = 2`, hand-computed:
    //   cycle 1 = 3   (POR)
    //   cycle 2 = 3   (POR)
    //   cycle 3 = NOT(0b0011) = 0b1100 = 12
    //   cycle 4 = NOT(0b1100) = 0b0011 = 3
    //   cycle 5 = NOT(0b0011) = 0b1100 = 12
    //   cycle 6 = NOT(0b1100) = 0b0011 = 3
    #[test]
    fn xor_vcc_register_matches_hand_computed_sequence() {
        const EXPECTED: [u64; 6] = [3, 3, 12, 3, 12, 3];

        for (i, &want) in EXPECTED.iter().enumerate() {
            let max_cycles = (i + 1) as u64;
            let (sim, summary) = run::<u64>(max_cycles, 2).unwrap();

            assert!(!summary.halted);
            assert_eq!(summary.cycles_run, max_cycles);
            assert_eq!(
                sim.store().get_bus(REG_POS, REG_WIDTH),
                want,
                "cycle {max_cycles}"
            );
        }
    }

    #[test]
    fn por_window_holds_the_reset_value_regardless_of_what_next_computes() {
        // Two POR cycles in a row both read back RESET_VALUE even though the
        // XOR-with-VCC hook runs and recomputes `next` every cycle.
        let (sim, summary) = run::<u64>(2, 2).unwrap();
        assert!(!summary.halted);
        assert_eq!(sim.store().get_bus(REG_POS, REG_WIDTH), RESET_VALUE);
        assert_eq!(sim.store().get_bus(NEXT_POS, NEXT_WIDTH), !RESET_VALUE & 0xF);
    }
}
