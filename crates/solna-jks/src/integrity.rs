#![forbid(unsafe_code)]

//! Reader that digests everything it consumes.
//!
//! The keystore checksum is `H(utf16be(password) || whitener || bytes)`
//! where `bytes` is everything before the checksum. Wrapping the
//! [`StreamReader`] keeps the digest in lockstep with the parser: each
//! consumed byte is fed exactly once and peeks feed nothing.

use solna_core::{Error, KeystoreConfig};
use solna_crypto::digest::{new_digest, DigestAlgorithm};
use solna_crypto::password::password_to_utf16be;

use crate::reader::{ByteSource, StreamReader};

pub struct IntegrityTrackingReader<'a> {
    inner: StreamReader<'a>,
    digest: Box<dyn DigestAlgorithm>,
}

impl<'a> IntegrityTrackingReader<'a> {
    /// Start reading `data` with a digest seeded from `password` and the whitener.
    pub fn new(data: &'a [u8], password: &str, config: &KeystoreConfig) -> Self {
        let mut digest = new_digest(config.digest);
        digest.update(&password_to_utf16be(password));
        digest.update(config.whitener);
        Self {
            inner: StreamReader::new(data),
            digest,
        }
    }

    /// Finalize the digest over everything read so far.
    ///
    /// Consumes the tracker; the returned reader continues at the same
    /// position without feeding any digest.
    pub fn finish(self) -> (Vec<u8>, StreamReader<'a>) {
        (self.digest.finalize(), self.inner)
    }
}

impl<'a> ByteSource<'a> for IntegrityTrackingReader<'a> {
    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let bytes = self.inner.read_bytes(len)?;
        self.digest.update(bytes);
        Ok(bytes)
    }

    fn peek_bytes(&self, len: usize) -> Result<&'a [u8], Error> {
        self.inner.peek_bytes(len)
    }

    fn position(&self) -> usize {
        self.inner.position()
    }

    fn remaining(&self) -> usize {
        self.inner.remaining()
    }
}

impl std::fmt::Debug for IntegrityTrackingReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrityTrackingReader")
            .field("position", &self.inner.position())
            .field("digest", &self.digest.name())
            .finish()
    }
}
