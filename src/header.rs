//! # Header Parsing
//!
//! The container revision and the public magic quick check. The magic is
//! the first eight bytes of the file and carries the revision directly:
//! `CANTUSA1` or `CANTUSA2`.

use crate::consts::{MAGIC_LEN, MAGIC_V1, MAGIC_V2};
use crate::error::{CantusError, Result};
use std::io::Read;

/// Container format revision, decided by the magic signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Revision {
    /// `CANTUSA1`: key block, tag block, payload.
    V1,
    /// `CANTUSA2`: adds tag checksum, reserved byte, and cover-art block.
    V2,
}

impl Revision {
    /// The 8-byte magic signature written for this revision.
    #[must_use]
    pub const fn magic(self) -> &'static [u8; 8] {
        match self {
            Revision::V1 => &MAGIC_V1,
            Revision::V2 => &MAGIC_V2,
        }
    }

    /// Classify an 8-byte magic, or `None` if it matches no known revision.
    #[must_use]
    pub fn from_magic(magic: &[u8; 8]) -> Option<Self> {
        match *magic {
            MAGIC_V1 => Some(Revision::V1),
            MAGIC_V2 => Some(Revision::V2),
            _ => None,
        }
    }
}

/// Read and validate the container revision from the magic signature.
///
/// Reads exactly the 8 magic bytes and classifies them, without touching the
/// key block or anything after it. Cheap enough to sniff large directories
/// of files before committing to a full decode.
///
/// # Thread Safety
///
/// Pure function over its reader; safe to call concurrently from multiple
/// threads on independent readers.
///
/// # Errors
///
/// - [`CantusError::Truncated`] — input ends before 8 magic bytes.
/// - [`CantusError::Format`] — 8 bytes present but not a known magic.
/// - [`CantusError::Io`] — the underlying read failed.
///
/// # Example
///
/// ```
/// use cantus_codec::{read_revision, Revision};
/// use std::io::Cursor;
///
/// let revision = read_revision(Cursor::new(b"CANTUSA2rest-of-file"))?;
/// assert_eq!(revision, Revision::V2);
/// # Ok::<(), cantus_codec::CantusError>(())
/// ```
pub fn read_revision<R: Read>(mut reader: R) -> Result<Revision> {
    let mut magic = [0u8; MAGIC_LEN];
    let mut filled = 0;
    while filled < MAGIC_LEN {
        match reader.read(&mut magic[filled..]) {
            Ok(0) => {
                return Err(CantusError::Truncated {
                    field: "magic",
                    offset: 0,
                    declared: MAGIC_LEN as u64,
                    available: filled as u64,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Revision::from_magic(&magic).ok_or_else(|| CantusError::Format {
        offset: 0,
        reason: format!("unrecognized magic {:02x?}", magic),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn known_magics() {
        let cases: &[(&[u8], Revision)] = &[
            (b"CANTUSA1", Revision::V1),
            (b"CANTUSA2", Revision::V2),
            (b"CANTUSA1trailing-bytes-ignored", Revision::V1),
        ];

        for &(bytes, expected) in cases {
            assert_eq!(read_revision(Cursor::new(bytes)).unwrap(), expected);
        }
    }

    #[test]
    fn unknown_magic_is_format_error_at_offset_zero() {
        let err = read_revision(Cursor::new(b"CANTUSA9")).unwrap_err();
        assert!(matches!(err, CantusError::Format { offset: 0, .. }));
    }

    #[test]
    fn short_input_is_truncated_magic() {
        let err = read_revision(Cursor::new(b"CANT")).unwrap_err();
        match err {
            CantusError::Truncated {
                field,
                offset,
                declared,
                available,
            } => {
                assert_eq!(field, "magic");
                assert_eq!(offset, 0);
                assert_eq!(declared, 8);
                assert_eq!(available, 4);
            }
            other => panic!("expected Truncated, got {other:?}"),
        }
    }
}
