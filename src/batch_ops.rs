//! Parallel decoding of independent containers (feature `batch-ops`).
//!
//! Each pipeline owns its own keystream state and cursor, so containers
//! parallelize with no shared mutable state and no locks.

use rayon::prelude::*;
use std::io::{Read, Write};

use crate::decoder::{decode, DecodeOutcome};
use crate::error::Result;

/// Decode every `(source, sink)` pair in parallel.
///
/// Returns one [`DecodeOutcome`] per pair, in input order. Fails on the
/// first error; already-decoded sinks may contain output when that
/// happens, the same as a partially-failed sequential batch.
pub fn decode_batch<R, W>(batch: &mut [(R, W)]) -> Result<Vec<DecodeOutcome>>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .map(|(src, dst)| decode(src, dst))
        .collect()
}
