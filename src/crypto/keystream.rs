//! src/crypto/keystream.rs
//! RC4-style keystream: the key schedule that builds the 256-entry
//! permutation table, and the explicit generator state that walks it.
//!
//! The same index-advance-and-swap recurrence drives both halves. The
//! generator state is a plain owned struct so the sequential dependency
//! between chunks is visible in the types instead of hidden in a closure.

/// The 256-entry byte permutation derived from key material.
///
/// Immutable once built; scoped to one decode. Building it is pure, so two
/// derivations from the same key material are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystreamTable([u8; 256]);

impl KeystreamTable {
    /// Build the table from key bytes (RC4 key-scheduling algorithm).
    ///
    /// Starts from the identity permutation, then runs 256 mixing rounds
    /// folding the key in cyclically with swaps.
    ///
    /// # Panics (by contract)
    ///
    /// Panics if `key` is empty. Never hit through the public decode path,
    /// which always supplies 32 bytes of unwrapped key material.
    #[must_use]
    pub fn schedule(key: &[u8]) -> Self {
        assert!(!key.is_empty(), "keystream key must not be empty");

        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }

        let mut j = 0u8;
        for round in 0..256usize {
            j = j
                .wrapping_add(table[round])
                .wrapping_add(key[round % key.len()]);
            table.swap(round, j as usize);
        }

        Self(table)
    }

    /// Borrow the raw permutation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 256] {
        &self.0
    }
}

/// Running keystream generator state: a working copy of the table plus the
/// two indices of the RC4 output recurrence.
///
/// Each output byte is a function of every byte generated before it, so the
/// stream is strictly in-order and non-seekable. One `Keystream` serves one
/// payload; chunking the payload differently does not change the output as
/// long as chunks are applied in order.
#[derive(Debug, Clone)]
pub struct Keystream {
    state: [u8; 256],
    i: u8,
    j: u8,
}

impl Keystream {
    /// Start a fresh generator over `table` at stream offset zero.
    #[must_use]
    pub fn new(table: &KeystreamTable) -> Self {
        Self {
            state: table.0,
            i: 0,
            j: 0,
        }
    }

    /// Produce the next keystream byte.
    #[inline(always)]
    pub fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.state[self.i as usize]);
        self.state.swap(self.i as usize, self.j as usize);
        let index = self.state[self.i as usize].wrapping_add(self.state[self.j as usize]);
        self.state[index as usize]
    }

    /// XOR the keystream over `buf` in place, advancing the state by
    /// `buf.len()` bytes.
    #[inline]
    pub fn apply(&mut self, buf: &mut [u8]) {
        for byte in buf {
            *byte ^= self.next_byte();
        }
    }
}
