//! Binary trace file writer.
//!
//! Format (spec.md §4.4): four magic bytes `80 81 82 83`, a little-endian
//! `u32` `trace_start` at byte offset 4 giving the byte offset where
//! snapshots begin, the netlist CSV copied byte-for-byte and padded with
//! `\n` out to the next multiple of `size_of::<W>()`, then one fixed-size
//! little-endian snapshot of the net store per [`TraceWriter::write_trace`]
//! call.
//!
//! Opening either file is a Configuration error (spec.md §7): logged once at
//! `warn` and the writer quietly becomes [`TraceWriter::Disabled`] rather
//! than failing the run. The same self-disable happens on a later write
//! error, so a full disk mid-run degrades a trace, not the simulation.

use std::fs::File;
use std::io::{self, Read, Write};
use std::marker::PhantomData;
use std::path::Path;

use sim_core::{NetStore, StorageWord};

const MAGIC: [u8; 4] = [0x80, 0x81, 0x82, 0x83];

/// Binary trace output, or nothing — see the module docs for why this is an
/// enum rather than a `Result`-returning constructor.
pub enum TraceWriter<W: StorageWord> {
    Enabled {
        file: File,
        _marker: PhantomData<W>,
    },
    Disabled,
}

impl<W: StorageWord> TraceWriter<W> {
    /// Opens `trace_path` for writing and `netlist_path` for reading, writes
    /// the header and netlist prelude, and returns the writer ready for
    /// [`Self::write_trace`]. Passing `trace_path = None` disables tracing
    /// without logging anything — the caller simply didn't ask for a trace.
    #[must_use]
    pub fn init(trace_path: Option<&Path>, netlist_path: &Path) -> Self {
        let Some(trace_path) = trace_path else {
            return Self::Disabled;
        };
        match Self::try_init(trace_path, netlist_path) {
            Ok(writer) => writer,
            Err(e) => {
                log::warn!(
                    "tracing disabled: could not initialize trace file {}: {e}",
                    trace_path.display()
                );
                Self::Disabled
            }
        }
    }

    fn try_init(trace_path: &Path, netlist_path: &Path) -> io::Result<Self> {
        let mut netlist = String::new();
        File::open(netlist_path)?.read_to_string(&mut netlist)?;

        let word_bytes = (W::BITS / 8) as usize;
        let mut prelude = netlist.into_bytes();
        while prelude.len() % word_bytes != 0 {
            prelude.push(b'\n');
        }

        let trace_start: u32 = (8 + prelude.len()) as u32;

        let mut file = File::create(trace_path)?;
        file.write_all(&MAGIC)?;
        file.write_all(&trace_start.to_le_bytes())?;
        file.write_all(&prelude)?;

        Ok(Self::Enabled {
            file,
            _marker: PhantomData,
        })
    }

    /// Appends one snapshot of `store`'s raw word array, little-endian, one
    /// call per hook invocation (spec.md §9's resolution of the "snapshot
    /// granularity" Open Question). A no-op when tracing is disabled.
    pub fn write_trace(&mut self, store: &NetStore<W>) {
        let Self::Enabled { file, .. } = self else {
            return;
        };
        if let Err(e) = Self::write_snapshot(file, store) {
            log::warn!("tracing disabled: write error: {e}");
            *self = Self::Disabled;
        }
    }

    fn write_snapshot(file: &mut File, store: &NetStore<W>) -> io::Result<()> {
        let word_bytes = (W::BITS / 8) as usize;
        for word in store.words() {
            let le = word.to_u64().to_le_bytes();
            file.write_all(&le[..word_bytes])?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

impl<W: StorageWord> Drop for TraceWriter<W> {
    fn drop(&mut self) {
        if let Self::Enabled { file, .. } = self {
            let _ = file.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read as _;

    #[test]
    fn missing_netlist_disables_tracing_instead_of_failing() {
        let dir = std::env::temp_dir();
        let trace_path = dir.join("sim_trace_test_missing_netlist.bin");
        let netlist_path = dir.join("sim_trace_test_does_not_exist.csv");
        let _ = std::fs::remove_file(&netlist_path);

        let writer: TraceWriter<u64> = TraceWriter::init(Some(&trace_path), &netlist_path);
        assert!(!writer.is_enabled());
    }

    #[test]
    fn header_and_prelude_match_spec_layout() {
        let dir = std::env::temp_dir();
        let trace_path = dir.join("sim_trace_test_header.bin");
        let netlist_path = dir.join("sim_trace_test_header.csv");
        std::fs::write(&netlist_path, b"clk,0,1\n").unwrap();

        {
            let mut writer: TraceWriter<u64> =
                TraceWriter::init(Some(&trace_path), &netlist_path);
            assert!(writer.is_enabled());
            let store: NetStore<u64> = NetStore::new(64);
            writer.write_trace(&store);
        }

        let mut bytes = Vec::new();
        File::open(&trace_path)
            .unwrap()
            .read_to_end(&mut bytes)
            .unwrap();

        assert_eq!(&bytes[0..4], &MAGIC);
        let trace_start = u32::from_le_bytes(bytes[4..8].try_into().unwrap());

        let prelude = &bytes[8..trace_start as usize];
        assert!(prelude.starts_with(b"clk,0,1\n"));
        assert_eq!(prelude.len() % 8, 0);

        let snapshot = &bytes[trace_start as usize..];
        assert_eq!(snapshot.len(), 8);

        std::fs::remove_file(&trace_path).ok();
        std::fs::remove_file(&netlist_path).ok();
    }
}
