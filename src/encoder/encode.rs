//! src/encoder/encode.rs
//! Container assembly: sections first, then the audio streamed through a
//! fresh keystream.

use crate::consts::AUDIO_CHUNK_LEN;
use crate::crypto::{wrap_key_material, Keystream, KeystreamTable};
use crate::encoder::options::EncodeOptions;
use crate::encoder::write::{write_block, write_magic, write_octets};
use crate::error::{CantusError, Result};
use crate::header::Revision;
use crate::metadata;
use std::io::{Read, Write};

/// Encode a Cantus container: sections, then the encrypted audio payload.
///
/// Writes the magic, the wrapped key block, the sealed tag block (an empty
/// block when no tags were attached), the revision 2 checksum/reserved/art
/// section, and finally streams `audio` through a fresh keystream into
/// `writer`. Returns the number of payload bytes written.
///
/// Output decodes back byte-identically with [`decode`](crate::decode).
///
/// # Errors
///
/// - [`CantusError::Metadata`] — cover art on a revision 1 container, or a
///   tag record that cannot be encoded.
/// - [`CantusError::Io`] — read or write failure.
pub fn encode<R: Read, W: Write>(
    mut audio: R,
    mut writer: W,
    options: &EncodeOptions,
) -> Result<u64> {
    if options.revision() == Revision::V1 && options.cover().is_some() {
        return Err(CantusError::Metadata(
            "cover art requires a revision 2 container".into(),
        ));
    }

    write_magic(&mut writer, options.revision())?;
    write_block(&mut writer, &wrap_key_material(options.key_material()))?;

    let tag_block = match options.tags() {
        Some(tags) => metadata::seal(tags)?,
        None => Vec::new(),
    };
    write_block(&mut writer, &tag_block)?;

    if options.revision() == Revision::V2 {
        write_octets(&mut writer, &crc32fast::hash(&tag_block).to_le_bytes())?;
        write_octets(&mut writer, &[0x00])?; // reserved
        write_block(&mut writer, options.cover().unwrap_or(&[]))?;
    }

    let table = KeystreamTable::schedule(options.key_material().as_bytes());
    let mut keystream = Keystream::new(&table);

    let mut chunk = vec![0u8; AUDIO_CHUNK_LEN];
    let mut payload_bytes = 0u64;
    loop {
        let n = match audio.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        keystream.apply(&mut chunk[..n]);
        writer.write_all(&chunk[..n])?;
        payload_bytes += n as u64;
    }
    writer.flush()?;

    Ok(payload_bytes)
}
