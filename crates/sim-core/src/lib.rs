//! Bit-packed four-state net storage and combinational logic primitives.
//!
//! This is the leaf crate of the WUT-4 simulator: no I/O, no scheduling, just
//! the packed representation of sibs (spec.md §3) and the lookup-table
//! combinational primitives over them (spec.md §4.2). Everything above this
//! (the cycle scheduler, hooks, trace writer) lives in `sim-engine`.

#![no_std]

extern crate alloc;

pub mod logic;
pub mod netstore;
pub mod sib;
pub mod word;

pub use netstore::{NetStore, get_n, set_n};
pub use sib::{GND, HIGHZ, Sib, UNDEF, VCC};
pub use word::StorageWord;
