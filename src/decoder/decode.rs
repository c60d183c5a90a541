//! src/decoder/decode.rs
//! The decode pipeline: sections → key material → keystream table →
//! metadata attempt → streamed payload.

use crate::crypto::{unwrap_key_material, KeystreamTable};
use crate::decoder::read::read_sections;
use crate::decoder::stream::AudioBlocks;
use crate::error::Result;
use crate::header::Revision;
use crate::metadata::{self, Metadata};
use crate::sniff::AudioKind;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// What one successful decode produced.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    /// Container revision that was decoded.
    pub revision: Revision,
    /// Extracted tags and cover, or `None` when the container carried no
    /// metadata or its metadata block was unusable.
    pub metadata: Option<Metadata>,
    /// Audio format sniffed from the first decrypted bytes.
    pub audio_kind: AudioKind,
    /// Total payload bytes written to the sink.
    pub audio_bytes: u64,
}

/// Decode one container from `reader`, streaming the audio into `writer`.
///
/// Stages run strictly in order: envelope parsing, key unwrapping and table
/// scheduling, the metadata attempt, then chunked payload decryption. The
/// payload is never buffered whole — each decrypted chunk goes straight to
/// the sink.
///
/// A container whose metadata block cannot be decoded still decodes its
/// audio: the metadata failure is logged as a warning and the outcome
/// carries `metadata: None`. A zero-length payload is valid and produces an
/// empty sink.
///
/// # Errors
///
/// - [`CantusError::Format`](crate::CantusError::Format) /
///   [`CantusError::Truncated`](crate::CantusError::Truncated) — bad
///   envelope; nothing is written to the sink.
/// - [`CantusError::KeyDerivation`](crate::CantusError::KeyDerivation) —
///   unusable key block; nothing is written to the sink.
/// - [`CantusError::Io`](crate::CantusError::Io) — payload read or sink
///   write failed mid-stream.
pub fn decode<R: Read, W: Write>(reader: R, mut writer: W) -> Result<DecodeOutcome> {
    let (sections, payload) = read_sections(reader)?;
    debug!("header validated: revision {:?}", sections.revision);

    let key_material = unwrap_key_material(&sections.key_block)?;
    let table = KeystreamTable::schedule(key_material.as_bytes());
    debug!("key material unwrapped, keystream table scheduled");

    let metadata = match metadata::extract(&sections) {
        Ok(metadata) => metadata,
        Err(err) => {
            warn!("metadata unusable, continuing without tags: {err}");
            None
        }
    };

    let mut audio_kind = AudioKind::Unknown;
    let mut audio_bytes = 0u64;
    for block in AudioBlocks::new(payload, &table) {
        let block = block?;
        if audio_bytes == 0 {
            audio_kind = AudioKind::sniff(&block);
        }
        writer.write_all(&block)?;
        audio_bytes += block.len() as u64;
    }
    writer.flush()?;
    debug!("payload done: {audio_bytes} byte(s), {audio_kind:?}");

    Ok(DecodeOutcome {
        revision: sections.revision,
        metadata,
        audio_kind,
        audio_bytes,
    })
}

/// Decode a container file into an output file, with buffered I/O.
///
/// Convenience over [`decode`] for the common path-in/path-out case. The
/// destination is created (or truncated) before decoding begins.
pub fn decode_path<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<DecodeOutcome> {
    let reader = BufReader::new(File::open(src)?);
    let writer = BufWriter::new(File::create(dst)?);
    decode(reader, writer)
}
