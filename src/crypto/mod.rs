// src/crypto/mod.rs

//! Cryptographic primitives: key-block (un)wrapping and the keystream.

pub(crate) mod keyblock;
pub(crate) mod keystream;

pub use keyblock::{unwrap_key_material, wrap_key_material, KeyMaterial};
pub use keystream::{Keystream, KeystreamTable};
