//! src/encoder/write.rs
//! Low-level wire writes for the encoder: magic, length-prefixed blocks,
//! raw octets.

use crate::error::Result;
use crate::header::Revision;
use std::io::Write;

/// Write raw bytes to the sink.
#[inline]
pub fn write_octets<W: Write>(writer: &mut W, data: &[u8]) -> Result<()> {
    writer.write_all(data)?;
    Ok(())
}

/// Write the 8-byte magic for `revision`.
#[inline]
pub fn write_magic<W: Write>(writer: &mut W, revision: Revision) -> Result<()> {
    write_octets(writer, revision.magic())
}

/// Write one length-prefixed block: u32 LE length, then the bytes.
///
/// # Panics (by contract)
///
/// Panics if `data` exceeds `u32::MAX` bytes. Never hit in practice: key
/// and tag blocks are a few hundred bytes, art blocks a few megabytes.
#[inline]
pub fn write_block<W: Write>(writer: &mut W, data: &[u8]) -> Result<()> {
    let len = u32::try_from(data.len()).expect("block exceeds u32 length prefix");
    write_octets(writer, &len.to_le_bytes())?;
    write_octets(writer, data)
}
