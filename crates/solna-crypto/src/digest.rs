#![forbid(unsafe_code)]

//! Digest (hash) algorithm implementations.
//!
//! A digest value is consumed by [`DigestAlgorithm::finalize`]; starting over
//! always means asking [`new_digest`] for a fresh instance.

use digest::Digest;
use solna_core::DigestKind;

/// Trait for digest algorithms.
pub trait DigestAlgorithm: Send {
    /// Feed data into the hash.
    fn update(&mut self, data: &[u8]);
    /// Finalize and return the hash value.
    fn finalize(self: Box<Self>) -> Vec<u8>;
    /// Output size in bytes.
    fn output_len(&self) -> usize;
    /// Algorithm name.
    fn name(&self) -> &'static str;
}

/// Create a clean digest context for `kind`.
pub fn new_digest(kind: DigestKind) -> Box<dyn DigestAlgorithm> {
    match kind {
        DigestKind::Sha1 => Box::new(Sha1Digest::new()),
    }
}

/// Compute a digest over the concatenation of `parts` in one shot.
pub fn digest_parts(kind: DigestKind, parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = new_digest(kind);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

struct Sha1Digest {
    inner: sha1::Sha1,
}

impl Sha1Digest {
    fn new() -> Self {
        Self {
            inner: sha1::Sha1::new(),
        }
    }
}

impl DigestAlgorithm for Sha1Digest {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.inner).to_vec()
    }

    fn output_len(&self) -> usize {
        DigestKind::Sha1.output_len()
    }

    fn name(&self) -> &'static str {
        DigestKind::Sha1.name()
    }
}
