//! src/decoder/stream.rs
//! Lazy payload decryption: a finite, non-restartable iterator of decrypted
//! chunks over the underlying reader.

use crate::consts::AUDIO_CHUNK_LEN;
use crate::crypto::{Keystream, KeystreamTable};
use crate::error::Result;
use std::io::Read;

/// Iterator of decrypted audio chunks.
///
/// Consumes the underlying reader; each `next()` pulls up to one chunk of
/// ciphertext and XORs the keystream over it in place. Chunk size is an I/O
/// granularity knob only — concatenating the yielded chunks gives the same
/// bytes for any chunk size, because the keystream state carries across
/// chunk boundaries.
///
/// An `Err` item ends the stream: after yielding an error the iterator
/// returns `None` forever.
pub struct AudioBlocks<R> {
    reader: R,
    keystream: Keystream,
    chunk_len: usize,
    done: bool,
}

impl<R: Read> AudioBlocks<R> {
    /// Stream with the default chunk size ([`AUDIO_CHUNK_LEN`]).
    #[must_use]
    pub fn new(reader: R, table: &KeystreamTable) -> Self {
        Self::with_chunk_len(reader, table, AUDIO_CHUNK_LEN)
    }

    /// Stream with an explicit chunk size.
    ///
    /// # Panics (by contract)
    ///
    /// Panics if `chunk_len` is zero.
    #[must_use]
    pub fn with_chunk_len(reader: R, table: &KeystreamTable, chunk_len: usize) -> Self {
        assert!(chunk_len > 0, "chunk length must be non-zero");
        Self {
            reader,
            keystream: Keystream::new(table),
            chunk_len,
            done: false,
        }
    }
}

impl<R: Read> Iterator for AudioBlocks<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = vec![0u8; self.chunk_len];
        let mut filled = 0;
        while filled < self.chunk_len {
            match self.reader.read(&mut chunk[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }

        if filled == 0 {
            self.done = true;
            return None;
        }

        chunk.truncate(filled);
        self.keystream.apply(&mut chunk);
        Some(Ok(chunk))
    }
}
