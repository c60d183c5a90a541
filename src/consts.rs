//! # Constants
//!
//! Fixed constants of the Cantus container format: magic signatures, the
//! static wrapping keys, and the wire-level field sizes. These are format
//! constants, not configuration — there is no runtime way to change them.

/// Magic signature of a revision 1 container.
///
/// Revision 1 files carry no tag checksum and no art block; the audio
/// payload begins immediately after the tag block.
pub const MAGIC_V1: [u8; 8] = *b"CANTUSA1";

/// Magic signature of a revision 2 container.
///
/// Revision 2 adds a CRC-32 over the tag ciphertext, a reserved byte, and a
/// length-prefixed cover-art block between the tag block and the payload.
pub const MAGIC_V2: [u8; 8] = *b"CANTUSA2";

/// Length of the magic signature in bytes.
pub const MAGIC_LEN: usize = 8;

/// ASCII marker prefixed to the key material inside the decrypted key block.
///
/// A decrypted key block that does not start with this marker was produced
/// under a different key or is corrupt, and is rejected.
pub const KEY_MARKER: &[u8; 11] = b"cantus-key:";

/// Exact length of the per-file key material, in bytes.
pub const KEY_MATERIAL_LEN: usize = 32;

/// Static AES-128 key under which the key block is wrapped (ECB + PKCS#7).
///
/// A known constant of the format, not a user secret.
pub const KEY_WRAP_KEY: [u8; 16] = [
    0x63, 0x61, 0x6e, 0x74, 0x75, 0x73, 0x2d, 0x77, 0x72, 0x61, 0x70, 0x2d, 0x6b, 0x65, 0x79,
    0x31,
];

/// Static AES-128 key under which the tag block is encrypted (ECB + PKCS#7).
///
/// Distinct from [`KEY_WRAP_KEY`]; never used for the audio payload.
pub const TAG_KEY: [u8; 16] = [
    0x63, 0x61, 0x6e, 0x74, 0x75, 0x73, 0x2d, 0x74, 0x61, 0x67, 0x2d, 0x6b, 0x65, 0x79, 0x32,
    0x30,
];

/// Default chunk size for streamed payload decryption (32 KiB).
///
/// Purely an I/O granularity choice: chunk boundaries never affect the
/// decrypted bytes.
pub const AUDIO_CHUNK_LEN: usize = 32 * 1024;
