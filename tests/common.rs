//! tests/common.rs
//! Shared fixtures: synthetic containers built through the public encoder.

use cantus_codec::{encode, EncodeOptions, KeyMaterial, Revision, TagRecord};
use std::io::Cursor;

/// Key material used by every fixture in the suite.
#[allow(dead_code)] // Used across multiple test files
pub const TEST_KEY_MATERIAL: [u8; 32] = [
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26,
    0x27, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x40, 0x41, 0x42, 0x43, 0x44, 0x45,
    0x46, 0x47,
];

/// Synthetic audio payload with a FLAC signature head.
#[allow(dead_code)] // Used across multiple test files
pub fn flac_audio(len: usize) -> Vec<u8> {
    let mut audio = b"fLaC\x00\x00\x00\x22".to_vec();
    audio.extend((0..len.saturating_sub(audio.len())).map(|i| (i * 31 % 251) as u8));
    audio
}

/// Tag record shared by metadata-carrying fixtures.
#[allow(dead_code)] // Used across multiple test files
pub fn sample_tags() -> TagRecord {
    TagRecord {
        title: "Clair de Lune".to_string(),
        artists: vec!["Claude Debussy".to_string()],
        album: "Suite bergamasque".to_string(),
        format: Some("flac".to_string()),
    }
}

/// Build a container with the given options over `audio`.
#[allow(dead_code)] // Used across multiple test files
pub fn build_container(audio: &[u8], options: &EncodeOptions) -> Vec<u8> {
    let mut container = Vec::new();
    encode(Cursor::new(audio), &mut container, options).expect("fixture encode");
    container
}

/// Full-featured revision 2 container: tags, cover, FLAC audio.
#[allow(dead_code)] // Used across multiple test files
pub fn rev2_container(audio: &[u8]) -> Vec<u8> {
    let options = EncodeOptions::new(KeyMaterial::from_bytes(TEST_KEY_MATERIAL))
        .with_tags(sample_tags())
        .with_cover(b"\x89PNG-not-really".to_vec());
    build_container(audio, &options)
}

/// Bare revision 1 container: no tags, no cover.
#[allow(dead_code)] // Used across multiple test files
pub fn rev1_container(audio: &[u8]) -> Vec<u8> {
    let options = EncodeOptions::new(KeyMaterial::from_bytes(TEST_KEY_MATERIAL))
        .with_revision(Revision::V1);
    build_container(audio, &options)
}
