//! Errors reported by table construction and internal consistency checks.

use crate::table::MAX_CAPACITY;

/// The error type for hash table construction and probe failures.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The requested starting capacity was zero or larger than [`MAX_CAPACITY`].
    #[error("requested capacity {requested} is outside the supported range 1..={max}", max = MAX_CAPACITY)]
    InvalidCapacity {
        /// The capacity passed by the caller
        requested: usize,
    },

    /// A linear probe visited every slot without finding the key or a free slot.
    ///
    /// The load-factor threshold keeps at least a quarter of the slots free, so this
    /// only surfaces if that invariant has been broken.
    #[error("probe sequence wrapped all {bucket_count} slots without finding a free slot")]
    ProbeSequenceExhausted {
        /// Number of slots in the table at the time of the probe
        bucket_count: usize,
    },

    /// A slot expected to hold a live entry was empty or a tombstone.
    #[error("slot {index} is not occupied")]
    SlotNotOccupied {
        /// Index of the slot that was read
        index: usize,
    },

    /// Every candidate from `start` up to `usize::MAX` is composite.
    #[error("no prime at or above {start} fits in usize")]
    PrimeOverflow {
        /// The smallest candidate that was asked for
        start: usize,
    },
}
