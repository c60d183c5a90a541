//! # Metadata
//!
//! Tag extraction from the encrypted, zlib-compressed tag block, plus the
//! sealing direction used by the encoder. Extraction failures are reported
//! as [`CantusError::Metadata`]; the decode pipeline downgrades them to a
//! warning, so a container with corrupt tags still yields its audio.

use crate::consts::TAG_KEY;
use crate::decoder::read::Sections;
use crate::error::{CantusError, Result};
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

type Aes128EcbDec = ecb::Decryptor<aes::Aes128>;
type Aes128EcbEnc = ecb::Encryptor<aes::Aes128>;

/// The JSON tag record carried inside the tag block.
///
/// Every field defaults when absent, so a sparse record from an older
/// writer still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Track title.
    #[serde(default)]
    pub title: String,
    /// Performing artists, in credit order.
    #[serde(default)]
    pub artists: Vec<String>,
    /// Album name.
    #[serde(default)]
    pub album: String,
    /// Audio format the writer declared (e.g. `"flac"`). Advisory only;
    /// [`AudioKind`](crate::AudioKind) sniffing works from the decoded
    /// bytes instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Tags plus the revision 2 cover art, as recovered from one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Decoded tag record.
    pub tags: TagRecord,
    /// Raw cover image bytes from the art block, when present.
    pub cover: Option<Vec<u8>>,
}

/// Extract metadata from parsed container sections.
///
/// Revision 2: the stored CRC-32 of the tag ciphertext is verified first.
/// Then the block is AES-128-ECB decrypted under [`TAG_KEY`], unpadded,
/// zlib-inflated, and parsed as a [`TagRecord`]. Cover art rides along from
/// the art block.
///
/// An empty tag block means the writer recorded no tags: that is
/// `Ok(None)`, not an error. Metadata is all-or-nothing — a bad tag block
/// drops the cover too, so callers never see a half-initialized record.
///
/// # Errors
///
/// [`CantusError::Metadata`] naming the failed step. Callers inside this
/// crate treat it as non-fatal.
pub fn extract(sections: &Sections) -> Result<Option<Metadata>> {
    if sections.tag_block.is_empty() {
        return Ok(None);
    }

    if let Some(stored) = sections.tag_checksum {
        let computed = crc32fast::hash(&sections.tag_block);
        if computed != stored {
            return Err(CantusError::Metadata(format!(
                "tag checksum mismatch: stored {stored:08x}, computed {computed:08x}"
            )));
        }
    }

    if sections.tag_block.len() % 16 != 0 {
        return Err(CantusError::Metadata(format!(
            "tag block length {} is not a multiple of the cipher block size",
            sections.tag_block.len()
        )));
    }

    let mut buf = sections.tag_block.clone();
    let compressed = Aes128EcbDec::new(&TAG_KEY.into())
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| CantusError::Metadata("bad padding in tag block".into()))?;

    let mut json = Vec::new();
    ZlibDecoder::new(compressed)
        .read_to_end(&mut json)
        .map_err(|e| CantusError::Metadata(format!("bad deflate stream in tag block: {e}")))?;

    let tags: TagRecord = serde_json::from_slice(&json)
        .map_err(|e| CantusError::Metadata(format!("malformed tag record: {e}")))?;

    Ok(Some(Metadata {
        tags,
        cover: sections.art.clone(),
    }))
}

/// Seal a tag record into tag-block ciphertext (encoder direction).
///
/// JSON-encode, zlib-deflate, then AES-128-ECB encrypt under [`TAG_KEY`].
/// Inverse of the decryption half of [`extract`].
pub fn seal(tags: &TagRecord) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(tags)
        .map_err(|e| CantusError::Metadata(format!("tag record not encodable: {e}")))?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    Ok(Aes128EcbEnc::new(&TAG_KEY.into()).encrypt_padded_vec_mut::<Pkcs7>(&compressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Revision;

    fn sections_with_tag_block(tag_block: Vec<u8>, checksum: Option<u32>) -> Sections {
        Sections {
            revision: if checksum.is_some() {
                Revision::V2
            } else {
                Revision::V1
            },
            key_block: Vec::new(),
            tag_block,
            tag_checksum: checksum,
            art: None,
        }
    }

    fn sample_tags() -> TagRecord {
        TagRecord {
            title: "Gymnopédie No.1".to_string(),
            artists: vec!["Erik Satie".to_string()],
            album: "Trois Gymnopédies".to_string(),
            format: Some("flac".to_string()),
        }
    }

    #[test]
    fn seal_then_extract_round_trips() {
        let block = seal(&sample_tags()).unwrap();
        let checksum = crc32fast::hash(&block);
        let sections = sections_with_tag_block(block, Some(checksum));

        let metadata = extract(&sections).unwrap().unwrap();
        assert_eq!(metadata.tags, sample_tags());
        assert_eq!(metadata.cover, None);
    }

    #[test]
    fn empty_tag_block_is_absent_not_error() {
        let sections = sections_with_tag_block(Vec::new(), None);
        assert_eq!(extract(&sections).unwrap(), None);
    }

    #[test]
    fn checksum_mismatch_is_metadata_error() {
        let block = seal(&sample_tags()).unwrap();
        let wrong = crc32fast::hash(&block) ^ 1;
        let sections = sections_with_tag_block(block, Some(wrong));

        let err = extract(&sections).unwrap_err();
        assert!(matches!(err, CantusError::Metadata(_)));
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn flipped_ciphertext_is_metadata_error() {
        let mut block = seal(&sample_tags()).unwrap();
        block[0] ^= 0xFF;
        // No checksum (rev 1 shape), so the failure surfaces at padding or
        // deflate instead.
        let sections = sections_with_tag_block(block, None);
        assert!(matches!(
            extract(&sections).unwrap_err(),
            CantusError::Metadata(_)
        ));
    }

    #[test]
    fn sparse_record_fills_defaults() {
        let sparse: TagRecord = serde_json::from_str(r#"{"title":"Untitled"}"#).unwrap();
        assert_eq!(sparse.title, "Untitled");
        assert!(sparse.artists.is_empty());
        assert!(sparse.album.is_empty());
        assert_eq!(sparse.format, None);
    }
}
