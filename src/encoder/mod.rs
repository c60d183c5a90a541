// src/encoder/mod.rs

//! Synthetic container writer.
//!
//! Core API: `encode(audio, writer, &options)?` for building a complete
//! container. Exists so tests and fixtures can prove round trips without
//! real container files; it is not a distribution tool.

pub(crate) mod encode;
pub(crate) mod options;
pub(crate) mod write;

pub use encode::encode;
pub use options::EncodeOptions;
pub use write::{write_block, write_magic, write_octets};
