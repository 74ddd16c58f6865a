#![forbid(unsafe_code)]

//! JKS container parsing.
//!
//! ```text
//! magic    u32  0xFEEDFEED
//! version  u32  1 | 2
//! count    u32
//! entries  count × { tag u32, alias utf, timestamp i64, body }
//! checksum [u8; 20]   (verified only when a password is supplied)
//! ```
//!
//! A tag-1 body is a length-prefixed protected key followed by an `i32`
//! chain count and that many certificates; a tag-2 body is one certificate.
//! Version 2 prefixes every certificate with its type string.

use solna_core::{ct_eq, Error, KeystoreConfig};
use solna_keys::{Certificate, CertificateDecoderRegistry};

use crate::entry::{Entry, PrivateKeyEntry, TrustedCertEntry};
use crate::integrity::IntegrityTrackingReader;
use crate::reader::{ByteSource, StreamReader};

const TAG_PRIVATE_KEY: u32 = 1;
const TAG_TRUSTED_CERT: u32 = 2;

/// Smallest possible encoded entry: tag, empty alias, timestamp.
const MIN_ENTRY_LEN: usize = 4 + 2 + 8;

/// Reads a JKS image into its ordered list of entries.
#[derive(Debug, Clone, Copy)]
pub struct ContainerParser<'c> {
    config: &'c KeystoreConfig,
    certs: &'c CertificateDecoderRegistry,
}

impl<'c> ContainerParser<'c> {
    pub fn new(config: &'c KeystoreConfig, certs: &'c CertificateDecoderRegistry) -> Self {
        Self { config, certs }
    }

    /// Parse `data`, verifying the trailing checksum when `password` is given.
    ///
    /// Without a password the checksum is not read and trailing bytes are ignored.
    pub fn parse(&self, data: &[u8], password: Option<&str>) -> Result<Vec<Entry>, Error> {
        match password {
            Some(password) => {
                let mut reader = IntegrityTrackingReader::new(data, password, self.config);
                let entries = self.read_entries(&mut reader)?;
                let (computed, rest) = reader.finish();
                self.verify_checksum(&computed, rest)?;
                Ok(entries)
            }
            None => {
                let mut reader = StreamReader::new(data);
                let entries = self.read_entries(&mut reader)?;
                if !reader.is_empty() {
                    tracing::debug!(
                        trailing = reader.remaining(),
                        "no password given, checksum not verified"
                    );
                }
                Ok(entries)
            }
        }
    }

    fn verify_checksum(&self, computed: &[u8], mut rest: StreamReader<'_>) -> Result<(), Error> {
        let stored = rest.read_bytes(self.config.digest_len())?;
        if !ct_eq(computed, stored) {
            tracing::debug!("keystore checksum mismatch");
            return Err(Error::Authentication);
        }
        Ok(())
    }

    fn read_entries<'a, R: ByteSource<'a>>(&self, r: &mut R) -> Result<Vec<Entry>, Error> {
        let magic = r.read_u32()?;
        if magic != self.config.magic {
            return Err(Error::Format(format!("invalid keystore magic {magic:#010x}")));
        }
        let version = r.read_u32()?;
        if !self.config.supports_version(version) {
            return Err(Error::Format(format!(
                "unsupported keystore version {version}"
            )));
        }
        let count = r.read_u32()? as usize;
        tracing::debug!(version, count, "reading keystore");

        // count is untrusted; never reserve more than the input could hold
        let bound = r.remaining() / MIN_ENTRY_LEN;
        let mut entries = Vec::with_capacity(count.min(bound));
        for _ in 0..count {
            entries.push(self.read_entry(r, version)?);
        }
        Ok(entries)
    }

    fn read_entry<'a, R: ByteSource<'a>>(&self, r: &mut R, version: u32) -> Result<Entry, Error> {
        let offset = r.position();
        let tag = r.read_u32()?;
        let alias = r.read_utf()?;
        let timestamp_ms = r.read_i64()?;

        match tag {
            TAG_PRIVATE_KEY => {
                let protected_key = r.read_length_prefixed()?.to_vec();
                let chain_count = r.read_i32()?;
                // negative means no chain
                let chain_len = usize::try_from(chain_count).unwrap_or(0);
                let mut chain = Vec::with_capacity(chain_len.min(r.remaining() / 4));
                for _ in 0..chain_len {
                    chain.push(self.read_certificate(r, version)?);
                }
                tracing::debug!(%alias, chain = chain.len(), "private key entry");
                Ok(Entry::PrivateKey(PrivateKeyEntry {
                    alias,
                    timestamp_ms,
                    protected_key,
                    chain,
                }))
            }
            TAG_TRUSTED_CERT => {
                let certificate = self.read_certificate(r, version)?;
                tracing::debug!(%alias, "trusted certificate entry");
                Ok(Entry::TrustedCert(TrustedCertEntry {
                    alias,
                    timestamp_ms,
                    certificate,
                }))
            }
            other => Err(Error::Format(format!(
                "unknown entry tag {other} at offset {offset}"
            ))),
        }
    }

    fn read_certificate<'a, R: ByteSource<'a>>(
        &self,
        r: &mut R,
        version: u32,
    ) -> Result<Certificate, Error> {
        let cert_type = if self.config.stores_cert_type(version) {
            r.read_utf()?
        } else {
            self.config.default_cert_type.to_string()
        };
        let der = r.read_length_prefixed()?.to_vec();
        self.certs.decode(&cert_type, der)
    }
}
