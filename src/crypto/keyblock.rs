//! src/crypto/keyblock.rs
//! Key-block wrapping: AES-128-ECB + PKCS#7 under the static wrap key, with
//! an ASCII marker in front of the key material. Both directions live here
//! for cohesion; the encoder only ever calls [`wrap_key_material`].

use crate::consts::{KEY_MARKER, KEY_MATERIAL_LEN, KEY_WRAP_KEY};
use crate::error::{CantusError, Result};
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};

type Aes128EcbDec = ecb::Decryptor<aes::Aes128>;
type Aes128EcbEnc = ecb::Encryptor<aes::Aes128>;

/// The 32 secret bytes recovered from a container's key block.
///
/// Exists only for the duration of one decode (or encode), is passed by
/// reference, and is never persisted by this crate.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial([u8; KEY_MATERIAL_LEN]);

impl KeyMaterial {
    /// Wrap raw bytes as key material.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; KEY_MATERIAL_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_MATERIAL_LEN] {
        &self.0
    }

    /// Fresh random key material, for encoding new containers.
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn random() -> Self {
        use rand::RngCore;

        let mut bytes = [0u8; KEY_MATERIAL_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }
}

// Key bytes stay out of debug output.
impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial([redacted; 32])")
    }
}

/// Recover the key material from a container's encrypted key block.
///
/// Decrypts the block with [`KEY_WRAP_KEY`], strips the PKCS#7 padding,
/// verifies and strips the `cantus-key:` marker, and requires exactly
/// 32 remaining bytes.
///
/// # Errors
///
/// [`CantusError::KeyDerivation`] naming the failed check: empty block,
/// length not a multiple of the cipher block size, bad padding, marker
/// mismatch, or wrong key-material length. All fatal — they mean the file
/// is corrupt or from an unknown format revision.
pub fn unwrap_key_material(block: &[u8]) -> Result<KeyMaterial> {
    if block.is_empty() {
        return Err(CantusError::KeyDerivation("key block is empty".into()));
    }
    if block.len() % 16 != 0 {
        return Err(CantusError::KeyDerivation(format!(
            "key block length {} is not a multiple of the cipher block size",
            block.len()
        )));
    }

    let mut buf = block.to_vec();
    let plaintext = Aes128EcbDec::new(&KEY_WRAP_KEY.into())
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| CantusError::KeyDerivation("bad padding in key block".into()))?;

    let material = plaintext.strip_prefix(KEY_MARKER.as_slice()).ok_or_else(|| {
        CantusError::KeyDerivation("key marker mismatch after decryption".into())
    })?;

    if material.len() != KEY_MATERIAL_LEN {
        return Err(CantusError::KeyDerivation(format!(
            "key material is {} byte(s), expected {KEY_MATERIAL_LEN}",
            material.len()
        )));
    }

    let mut bytes = [0u8; KEY_MATERIAL_LEN];
    bytes.copy_from_slice(material);
    Ok(KeyMaterial(bytes))
}

/// Produce the encrypted key block for the given key material.
///
/// Inverse of [`unwrap_key_material`]: marker + key bytes, PKCS#7-padded and
/// AES-128-ECB encrypted under [`KEY_WRAP_KEY`]. Infallible — the plaintext
/// shape is fixed.
#[must_use]
pub fn wrap_key_material(material: &KeyMaterial) -> Vec<u8> {
    let mut plaintext = Vec::with_capacity(KEY_MARKER.len() + KEY_MATERIAL_LEN);
    plaintext.extend_from_slice(KEY_MARKER);
    plaintext.extend_from_slice(material.as_bytes());
    Aes128EcbEnc::new(&KEY_WRAP_KEY.into()).encrypt_padded_vec_mut::<Pkcs7>(&plaintext)
}
