//! src/decoder/read.rs
//! Envelope parsing: magic, length-prefixed sections, running byte offset.
//!
//! Every read here is truncation-aware: a length prefix is never trusted
//! for allocation, and running short of a declared length reports the
//! field, the declared count, and what was actually available.

use crate::consts::MAGIC_LEN;
use crate::error::{CantusError, Result};
use crate::header::Revision;
use std::io::Read;

/// The owned sections of one container, everything before the payload.
///
/// Block contents are opaque at this layer — interpretation belongs to the
/// key derivation unit and the metadata extractor.
#[derive(Debug, Clone)]
pub struct Sections {
    /// Revision decided by the magic.
    pub revision: Revision,
    /// Encrypted key block, still wrapped.
    pub key_block: Vec<u8>,
    /// Encrypted, compressed tag block. May be empty (no tags written).
    pub tag_block: Vec<u8>,
    /// Revision 2 only: stored CRC-32 of the tag block ciphertext.
    pub tag_checksum: Option<u32>,
    /// Revision 2 only: raw cover-art bytes, `None` when the art block is
    /// empty.
    pub art: Option<Vec<u8>>,
}

/// Read the container envelope, leaving `reader` at the first payload byte.
///
/// Consumes the magic, the key block, the tag block, and (revision 2) the
/// tag checksum, reserved byte, and art block. Returns the owned sections
/// together with the reader so the caller can stream the payload.
///
/// # Errors
///
/// - [`CantusError::Format`] — unrecognized magic; reported before any
///   key-block byte is read.
/// - [`CantusError::Truncated`] — any section shorter than declared.
/// - [`CantusError::Io`] — underlying read failure.
pub fn read_sections<R: Read>(mut reader: R) -> Result<(Sections, R)> {
    let mut offset = 0u64;

    let magic: [u8; MAGIC_LEN] = read_exact_field(&mut reader, "magic", &mut offset)?;
    let revision = Revision::from_magic(&magic).ok_or_else(|| CantusError::Format {
        offset: 0,
        reason: format!("unrecognized magic {:02x?}", magic),
    })?;

    let key_block = read_block(&mut reader, "key block", &mut offset)?;
    let tag_block = read_block(&mut reader, "tag block", &mut offset)?;

    let (tag_checksum, art) = match revision {
        Revision::V1 => (None, None),
        Revision::V2 => {
            let checksum = read_u32_le(&mut reader, "tag checksum", &mut offset)?;
            // Reserved byte: opaque, value not validated.
            let _reserved: [u8; 1] = read_exact_field(&mut reader, "reserved byte", &mut offset)?;
            let art = read_block(&mut reader, "art block", &mut offset)?;
            (Some(checksum), (!art.is_empty()).then_some(art))
        }
    };

    Ok((
        Sections {
            revision,
            key_block,
            tag_block,
            tag_checksum,
            art,
        },
        reader,
    ))
}

/// Read exactly `N` bytes or report how far the input actually reached.
///
/// `offset` is the running input position; it only advances on success, so
/// on failure it still names the byte at which the field begins.
fn read_exact_field<R: Read, const N: usize>(
    reader: &mut R,
    field: &'static str,
    offset: &mut u64,
) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    let mut filled = 0;
    while filled < N {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(CantusError::Truncated {
                    field,
                    offset: *offset,
                    declared: N as u64,
                    available: filled as u64,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    *offset += N as u64;
    Ok(buf)
}

fn read_u32_le<R: Read>(reader: &mut R, field: &'static str, offset: &mut u64) -> Result<u32> {
    let bytes: [u8; 4] = read_exact_field(reader, field, offset)?;
    Ok(u32::from_le_bytes(bytes))
}

/// Read one length-prefixed block: u32 LE length, then that many bytes.
///
/// The declared length caps a `take` instead of sizing an allocation, so a
/// hostile prefix cannot demand memory the input does not carry.
fn read_block<R: Read>(reader: &mut R, field: &'static str, offset: &mut u64) -> Result<Vec<u8>> {
    let declared = u64::from(read_u32_le(reader, field, offset)?);

    let mut block = Vec::new();
    reader.take(declared).read_to_end(&mut block)?;
    if (block.len() as u64) < declared {
        return Err(CantusError::Truncated {
            field,
            offset: *offset,
            declared,
            available: block.len() as u64,
        });
    }
    *offset += declared;
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn envelope_v1(key_block: &[u8], tag_block: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"CANTUSA1");
        out.extend_from_slice(&(key_block.len() as u32).to_le_bytes());
        out.extend_from_slice(key_block);
        out.extend_from_slice(&(tag_block.len() as u32).to_le_bytes());
        out.extend_from_slice(tag_block);
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn v1_sections_and_cursor_position() {
        let bytes = envelope_v1(&[1, 2, 3], &[9, 9], b"PAYLOAD");
        let (sections, mut rest) = read_sections(Cursor::new(bytes)).unwrap();

        assert_eq!(sections.revision, Revision::V1);
        assert_eq!(sections.key_block, vec![1, 2, 3]);
        assert_eq!(sections.tag_block, vec![9, 9]);
        assert_eq!(sections.tag_checksum, None);
        assert_eq!(sections.art, None);

        let mut payload = Vec::new();
        rest.read_to_end(&mut payload).unwrap();
        assert_eq!(payload, b"PAYLOAD");
    }

    #[test]
    fn zero_length_blocks_are_accepted() {
        let bytes = envelope_v1(&[], &[], b"");
        let (sections, _) = read_sections(Cursor::new(bytes)).unwrap();
        assert!(sections.key_block.is_empty());
        assert!(sections.tag_block.is_empty());
    }

    #[test]
    fn key_block_longer_than_input_is_truncated() {
        let mut bytes = b"CANTUSA1".to_vec();
        bytes.extend_from_slice(&100u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 10]); // only 10 of the declared 100

        let err = read_sections(Cursor::new(bytes)).unwrap_err();
        match err {
            CantusError::Truncated {
                field,
                offset,
                declared,
                available,
            } => {
                assert_eq!(field, "key block");
                assert_eq!(offset, 12, "block bytes begin after magic + prefix");
                assert_eq!(declared, 100);
                assert_eq!(available, 10);
            }
            other => panic!("expected Truncated, got {other:?}"),
        }
    }

    #[test]
    fn missing_rev2_sections_are_truncated() {
        // Valid magic + empty key/tag blocks, then EOF where the checksum
        // should be.
        let mut bytes = b"CANTUSA2".to_vec();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());

        let err = read_sections(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            CantusError::Truncated {
                field: "tag checksum",
                ..
            }
        ));
    }

    #[test]
    fn bad_magic_reads_nothing_further() {
        #[derive(Debug)]
        struct CountingReader<'a> {
            inner: Cursor<&'a [u8]>,
            read: usize,
        }
        impl Read for CountingReader<'_> {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                let n = self.inner.read(buf)?;
                self.read += n;
                Ok(n)
            }
        }

        let bytes = b"NOTMAGIC-key-block-bytes-follow";
        let mut reader = CountingReader {
            inner: Cursor::new(bytes.as_slice()),
            read: 0,
        };
        let err = read_sections(&mut reader).unwrap_err();
        assert!(matches!(err, CantusError::Format { offset: 0, .. }));
        assert_eq!(reader.read, MAGIC_LEN, "read past the magic on failure");
    }
}
