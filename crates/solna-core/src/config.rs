#![forbid(unsafe_code)]

//! Immutable format configuration.
//!
//! Every constant the format depends on lives in a [`KeystoreConfig`] value
//! that is passed into the parser, the key recovery and the key decoder.

use crate::oid;

/// Hash function used for the keystore checksum and key protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    Sha1,
}

impl DigestKind {
    /// Output size in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
        }
    }
}

/// Constants describing one keystore dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystoreConfig {
    /// Leading 32-bit magic number.
    pub magic: u32,
    /// Accepted container versions.
    pub versions: &'static [u32],
    /// Domain separation bytes mixed with the password for the file checksum.
    pub whitener: &'static [u8],
    /// Algorithm identifier of the password-based key protection scheme.
    pub protection_oid: &'static str,
    /// Certificate type assumed when the format does not store one.
    pub default_cert_type: &'static str,
    /// Required version of the decrypted private key info structure.
    pub key_info_version: i64,
    pub digest: DigestKind,
}

impl KeystoreConfig {
    /// The Java KeyStore (JKS) format.
    pub const JKS: KeystoreConfig = KeystoreConfig {
        magic: 0xFEED_FEED,
        versions: &[1, 2],
        whitener: b"Mighty Aphrodite",
        protection_oid: oid::JKS_KEY_PROTECTOR,
        default_cert_type: "X.509",
        key_info_version: 0,
        digest: DigestKind::Sha1,
    };

    /// Length of the digest, salt and checksum fields.
    pub const fn digest_len(&self) -> usize {
        self.digest.output_len()
    }

    pub fn supports_version(&self, version: u32) -> bool {
        self.versions.contains(&version)
    }

    /// Whether entries of this container version carry a certificate type string.
    pub fn stores_cert_type(&self, version: u32) -> bool {
        version >= 2
    }
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self::JKS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jks_defaults() {
        let config = KeystoreConfig::default();
        assert_eq!(config.magic, 0xFEEDFEED);
        assert_eq!(config.digest_len(), 20);
        assert_eq!(config.whitener.len(), 16);
        assert!(config.supports_version(1));
        assert!(config.supports_version(2));
        assert!(!config.supports_version(0));
        assert!(!config.supports_version(3));
    }

    #[test]
    fn test_cert_type_by_version() {
        let config = KeystoreConfig::JKS;
        assert!(!config.stores_cert_type(1));
        assert!(config.stores_cert_type(2));
    }
}
