#![forbid(unsafe_code)]

//! Keystore entries.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use solna_core::{Error, KeystoreConfig};
use solna_keys::{
    Certificate, EncryptedPrivateKeyInfo, KeyAlgorithmTable, KeyContainerDecoder, KeyRecovery,
    RecoveredKey,
};

/// A private key entry: protected key plus its certificate chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeyEntry {
    pub alias: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// DER `EncryptedPrivateKeyInfo` as stored; not decrypted by the parser.
    pub protected_key: Vec<u8>,
    /// Leaf first. Empty when the stored chain count is zero or negative.
    pub chain: Vec<Certificate>,
}

impl PrivateKeyEntry {
    /// Decode the stored `EncryptedPrivateKeyInfo` wrapper.
    pub fn encrypted_key_info(&self) -> Result<EncryptedPrivateKeyInfo, Error> {
        EncryptedPrivateKeyInfo::from_der(&self.protected_key)
    }

    /// Decrypt the key with `password` and render its export form.
    ///
    /// The key password may differ from the keystore password.
    pub fn recover(&self, password: &str, config: &KeystoreConfig) -> Result<RecoveredKey, Error> {
        self.recover_with(password, config, KeyAlgorithmTable::standard())
    }

    pub fn recover_with(
        &self,
        password: &str,
        config: &KeystoreConfig,
        table: KeyAlgorithmTable,
    ) -> Result<RecoveredKey, Error> {
        let info = self.encrypted_key_info()?;
        let plaintext = KeyRecovery::new(config).recover(&info, password)?;
        let key = KeyContainerDecoder::new(config, table).parse_key(&plaintext)?;
        tracing::debug!(alias = %self.alias, algorithm = key.algorithm_name, "recovered private key");
        Ok(key)
    }
}

/// A trusted certificate entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedCertEntry {
    pub alias: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    pub certificate: Certificate,
}

/// One keystore record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    PrivateKey(PrivateKeyEntry),
    TrustedCert(TrustedCertEntry),
}

impl Entry {
    pub fn alias(&self) -> &str {
        match self {
            Self::PrivateKey(e) => &e.alias,
            Self::TrustedCert(e) => &e.alias,
        }
    }

    pub fn timestamp_ms(&self) -> i64 {
        match self {
            Self::PrivateKey(e) => e.timestamp_ms,
            Self::TrustedCert(e) => e.timestamp_ms,
        }
    }

    /// Creation time as a [`SystemTime`]; timestamps before the epoch are kept.
    pub fn created(&self) -> SystemTime {
        let ms = self.timestamp_ms();
        let offset = Duration::from_millis(ms.unsigned_abs());
        if ms >= 0 {
            UNIX_EPOCH + offset
        } else {
            UNIX_EPOCH - offset
        }
    }

    pub fn as_private_key(&self) -> Option<&PrivateKeyEntry> {
        match self {
            Self::PrivateKey(e) => Some(e),
            Self::TrustedCert(_) => None,
        }
    }

    pub fn as_trusted_cert(&self) -> Option<&TrustedCertEntry> {
        match self {
            Self::TrustedCert(e) => Some(e),
            Self::PrivateKey(_) => None,
        }
    }

    /// Short label for listings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::PrivateKey(_) => "PrivateKeyEntry",
            Self::TrustedCert(_) => "trustedCertEntry",
        }
    }
}
