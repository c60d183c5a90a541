//! src/encoder/options.rs
//! Builder-style options for the synthetic encoder.

use crate::crypto::KeyMaterial;
use crate::header::Revision;
use crate::metadata::TagRecord;

/// Options for [`encode`](crate::encode).
///
/// Defaults: revision 2, no tags, no cover. Key material must be supplied —
/// there is no sensible default for a secret.
///
/// # Thread Safety
///
/// `Send + Sync`; options can be built and shared across threads. All
/// methods are pure.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    revision: Revision,
    key_material: KeyMaterial,
    tags: Option<TagRecord>,
    cover: Option<Vec<u8>>,
}

impl EncodeOptions {
    /// Options for a revision 2 container with the given key material.
    #[must_use]
    pub fn new(key_material: KeyMaterial) -> Self {
        Self {
            revision: Revision::V2,
            key_material,
            tags: None,
            cover: None,
        }
    }

    /// Set the container revision.
    #[must_use]
    pub fn with_revision(mut self, revision: Revision) -> Self {
        self.revision = revision;
        self
    }

    /// Attach a tag record.
    #[must_use]
    pub fn with_tags(mut self, tags: TagRecord) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Attach cover-art bytes. Only representable in revision 2; `encode`
    /// rejects cover art on a revision 1 container.
    #[must_use]
    pub fn with_cover(mut self, cover: Vec<u8>) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Selected revision.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Key material the container will be sealed under.
    #[must_use]
    pub const fn key_material(&self) -> &KeyMaterial {
        &self.key_material
    }

    /// Tag record, if one was attached.
    #[must_use]
    pub fn tags(&self) -> Option<&TagRecord> {
        self.tags.as_ref()
    }

    /// Cover bytes, if attached.
    #[must_use]
    pub fn cover(&self) -> Option<&[u8]> {
        self.cover.as_deref()
    }
}
