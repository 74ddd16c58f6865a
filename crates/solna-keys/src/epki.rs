#![forbid(unsafe_code)]

//! `EncryptedPrivateKeyInfo` wrapper around a protected key (PKCS#8 §6).

use solna_core::Error;

use crate::asn1::{oid_to_string, skip_remaining};

/// Algorithm identifier plus the opaque encrypted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPrivateKeyInfo {
    /// Dotted-decimal protection algorithm OID.
    pub algorithm_oid: String,
    /// For the JKS protector: `salt || encrypted key || digest`.
    pub encrypted_data: Vec<u8>,
}

impl EncryptedPrivateKeyInfo {
    pub fn new(algorithm_oid: impl Into<String>, encrypted_data: Vec<u8>) -> Self {
        Self {
            algorithm_oid: algorithm_oid.into(),
            encrypted_data,
        }
    }

    /// Decode `SEQUENCE { AlgorithmIdentifier, OCTET STRING }`.
    ///
    /// Algorithm parameters, normally NULL, are ignored.
    pub fn from_der(der: &[u8]) -> Result<Self, Error> {
        let (algorithm_oid, encrypted_data) = yasna::parse_der(der, |r| {
            r.read_sequence(|r| {
                let oid = r.next().read_sequence(|r| {
                    let oid = r.next().read_oid()?;
                    skip_remaining(r)?;
                    Ok(oid)
                })?;
                let data = r.next().read_bytes()?;
                Ok((oid, data))
            })
        })
        .map_err(|e| Error::corrupt_key("malformed EncryptedPrivateKeyInfo", e))?;

        Ok(Self {
            algorithm_oid: oid_to_string(&algorithm_oid),
            encrypted_data,
        })
    }
}
