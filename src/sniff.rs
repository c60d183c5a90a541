//! # Audio Kind Sniffing
//!
//! Detects the decoded payload's audio format from its first bytes, so a
//! caller can name the output file correctly even when the tag record is
//! absent or lies about the format.

/// Audio format detected from the first decrypted payload block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioKind {
    /// `fLaC` stream marker.
    Flac,
    /// ID3v2 header or a bare MPEG frame sync.
    Mp3,
    /// `OggS` page capture pattern.
    Ogg,
    /// RIFF container with a `WAVE` form type.
    Wav,
    /// None of the known signatures. Not an error — the audio may simply
    /// be a format this crate does not recognize.
    Unknown,
}

impl AudioKind {
    /// Classify decoded audio by its leading bytes.
    #[must_use]
    pub fn sniff(head: &[u8]) -> Self {
        if head.starts_with(b"fLaC") {
            AudioKind::Flac
        } else if head.starts_with(b"OggS") {
            AudioKind::Ogg
        } else if head.len() >= 12 && head.starts_with(b"RIFF") && &head[8..12] == b"WAVE" {
            AudioKind::Wav
        } else if head.starts_with(b"ID3")
            || (head.len() >= 2 && head[0] == 0xFF && head[1] & 0xE0 == 0xE0)
        {
            AudioKind::Mp3
        } else {
            AudioKind::Unknown
        }
    }

    /// Conventional file extension for this format, if one is known.
    #[must_use]
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            AudioKind::Flac => Some("flac"),
            AudioKind::Mp3 => Some("mp3"),
            AudioKind::Ogg => Some("ogg"),
            AudioKind::Wav => Some("wav"),
            AudioKind::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_heads() {
        let cases: &[(&[u8], AudioKind)] = &[
            (b"fLaC\x00\x00\x00\x22", AudioKind::Flac),
            (b"OggS\x00\x02", AudioKind::Ogg),
            (b"RIFF\x24\x08\x00\x00WAVEfmt ", AudioKind::Wav),
            (b"ID3\x04\x00", AudioKind::Mp3),
            (&[0xFF, 0xFB, 0x90, 0x00], AudioKind::Mp3), // bare MPEG sync
            (b"random bytes", AudioKind::Unknown),
            (b"", AudioKind::Unknown),
            (b"RIFF\x24\x08\x00\x00AVI ", AudioKind::Unknown), // RIFF, not WAVE
        ];

        for &(head, expected) in cases {
            assert_eq!(AudioKind::sniff(head), expected, "head {head:02x?}");
        }
    }

    #[test]
    fn extensions() {
        assert_eq!(AudioKind::Flac.extension(), Some("flac"));
        assert_eq!(AudioKind::Unknown.extension(), None);
    }
}
