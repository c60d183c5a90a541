// src/lib.rs

//! # cantus-codec
//!
//! Decoder for the Cantus encrypted music container format, plus a
//! synthetic encoder for building test fixtures and round-trip proofs.
//!
//! A container is: an 8-byte magic, a wrapped key block, an encrypted
//! compressed tag block, (revision 2) a checksum/reserved/art section, and
//! a keystream-encrypted audio payload running to end of input. [`decode`]
//! validates the envelope, unwraps the key material, schedules the
//! keystream table, attempts metadata extraction (non-fatal on failure),
//! and streams decrypted audio to a sink without buffering the file.
//!
//! ```
//! use cantus_codec::{decode, encode, EncodeOptions, KeyMaterial};
//! use std::io::Cursor;
//!
//! let options = EncodeOptions::new(KeyMaterial::from_bytes([7; 32]));
//! let mut container = Vec::new();
//! encode(Cursor::new(b"fLaC...audio".as_slice()), &mut container, &options)?;
//!
//! let mut audio = Vec::new();
//! let outcome = decode(Cursor::new(container), &mut audio)?;
//! assert_eq!(audio, b"fLaC...audio");
//! assert_eq!(outcome.audio_bytes, 12);
//! # Ok::<(), cantus_codec::CantusError>(())
//! ```

#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod consts;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod header;
pub mod metadata;
pub mod sniff;

// High-level API — this is what 99% of users import
pub use decoder::{decode, decode_path, DecodeOutcome};
pub use encoder::{encode, EncodeOptions};
pub use error::{CantusError, Result};
pub use header::{read_revision, Revision};

// Lower-level pieces, public at the root for custom flows: sniffing files
// without decoding, driving the payload stream by hand, or unwrapping a key
// block outside the pipeline.
pub use crypto::{unwrap_key_material, KeyMaterial, Keystream, KeystreamTable};
pub use decoder::{read_sections, AudioBlocks, Sections};
pub use metadata::{Metadata, TagRecord};
pub use sniff::AudioKind;

#[cfg(feature = "batch-ops")]
pub use batch_ops::decode_batch;
