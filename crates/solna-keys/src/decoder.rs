#![forbid(unsafe_code)]

//! Interpretation of recovered PKCS#8 `PrivateKeyInfo` structures.
//!
//! ```text
//! PrivateKeyInfo ::= SEQUENCE {
//!   version             INTEGER,
//!   privateKeyAlgorithm AlgorithmIdentifier,
//!   privateKey          OCTET STRING,
//!   ... }
//! ```

use solna_core::{Error, KeystoreConfig};
use solna_crypto::pem::{encode_pem, PRIVATE_KEY_LABEL, RSA_PRIVATE_KEY_LABEL};
use zeroize::Zeroizing;

use crate::algorithm::{KeyAlgorithmTable, KeyFamily, KeyStrategy};
use crate::asn1::{oid_to_string, skip_remaining};

/// A decrypted private key and its exported text form.
pub struct RecoveredKey {
    /// Dotted-decimal algorithm OID from the key info.
    pub algorithm_oid: String,
    /// Algorithm name from the table row that handled the key.
    pub algorithm_name: &'static str,
    pub strategy: KeyStrategy,
    /// Plaintext PKCS#8 DER bytes.
    pub der: Zeroizing<Vec<u8>>,
    /// PEM export: `RSA PRIVATE KEY` for unwrapped RSA, `PRIVATE KEY` otherwise.
    pub pem: Zeroizing<String>,
}

impl std::fmt::Debug for RecoveredKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveredKey")
            .field("algorithm_oid", &self.algorithm_oid)
            .field("algorithm_name", &self.algorithm_name)
            .field("strategy", &self.strategy)
            .field("der", &format_args!("<{} bytes>", self.der.len()))
            .finish_non_exhaustive()
    }
}

struct KeyInfoFields {
    algorithm_oid: String,
    private_key: Zeroizing<Vec<u8>>,
}

enum KeyInfo {
    Fields(KeyInfoFields),
    OtherVersion(i64),
}

/// Decodes PKCS#8 private keys and renders their export form.
#[derive(Debug, Clone, Copy)]
pub struct KeyContainerDecoder<'c> {
    config: &'c KeystoreConfig,
    table: KeyAlgorithmTable,
}

impl<'c> KeyContainerDecoder<'c> {
    pub fn new(config: &'c KeystoreConfig, table: KeyAlgorithmTable) -> Self {
        Self { config, table }
    }

    /// Decode `der` and export it according to its algorithm's strategy.
    ///
    /// The version is checked before the rest of the structure is read.
    pub fn parse_key(&self, der: &[u8]) -> Result<RecoveredKey, Error> {
        let fields = match read_key_info(der, self.config.key_info_version)? {
            KeyInfo::Fields(fields) => fields,
            KeyInfo::OtherVersion(found) => {
                return Err(Error::VersionMismatch {
                    expected: self.config.key_info_version,
                    found,
                })
            }
        };

        let algorithm = self.table.lookup(&fields.algorithm_oid).ok_or_else(|| {
            Error::corrupt_key(
                format!("cannot export private key ({})", fields.algorithm_oid),
                Error::UnsupportedAlgorithm(format!(
                    "private key algorithm {}",
                    fields.algorithm_oid
                )),
            )
        })?;

        let pem = match algorithm.strategy {
            KeyStrategy::PassThrough => Zeroizing::new(encode_pem(PRIVATE_KEY_LABEL, der)?),
            KeyStrategy::Unwrap(KeyFamily::Rsa) => unwrap_rsa(&fields.private_key)?,
        };

        tracing::debug!(
            algorithm = algorithm.name,
            strategy = ?algorithm.strategy,
            "decoded private key"
        );

        Ok(RecoveredKey {
            algorithm_oid: fields.algorithm_oid,
            algorithm_name: algorithm.name,
            strategy: algorithm.strategy,
            der: Zeroizing::new(der.to_vec()),
            pem,
        })
    }
}

fn read_key_info(der: &[u8], expected_version: i64) -> Result<KeyInfo, Error> {
    let info = yasna::parse_der(der, |r| {
        r.read_sequence(|r| {
            let version = r.next().read_i64()?;
            if version != expected_version {
                skip_remaining(r)?;
                return Ok(KeyInfo::OtherVersion(version));
            }
            let oid = r.next().read_sequence(|r| {
                let oid = r.next().read_oid()?;
                skip_remaining(r)?;
                Ok(oid)
            })?;
            let private_key = r.next().read_bytes()?;
            // attributes [0] and publicKey [1]
            skip_remaining(r)?;
            Ok(KeyInfo::Fields(KeyInfoFields {
                algorithm_oid: oid_to_string(&oid),
                private_key: Zeroizing::new(private_key),
            }))
        })
    })
    .map_err(|e| Error::corrupt_key("malformed PKCS#8 private key info", e))?;
    Ok(info)
}

/// Decode PKCS#1 `RSAPrivateKey` octets and re-encode them as PEM.
fn unwrap_rsa(key_octets: &[u8]) -> Result<Zeroizing<String>, Error> {
    use pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};

    let key = rsa::RsaPrivateKey::from_pkcs1_der(key_octets)
        .map_err(|e| Error::corrupt_key("failed to decode RSA private key", e))?;
    let pkcs1 = key
        .to_pkcs1_der()
        .map_err(|e| Error::corrupt_key("failed to encode RSA private key", e))?;
    Ok(Zeroizing::new(encode_pem(RSA_PRIVATE_KEY_LABEL, pkcs1.as_bytes())?))
}
