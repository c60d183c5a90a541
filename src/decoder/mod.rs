// src/decoder/mod.rs

//! High-level decoding facade.
//!
//! Core API: `decode(input, output)?` for full container handling.
//! Helpers: `read_sections` for the raw envelope, `AudioBlocks` for custom
//! streaming flows.

pub(crate) mod decode;
pub(crate) mod read;
pub(crate) mod stream;

pub use decode::{decode, decode_path, DecodeOutcome};
pub use read::{read_sections, Sections};
pub use stream::AudioBlocks;
