#![forbid(unsafe_code)]

//! Certificates stored in keystore entries.
//!
//! Entries name the certificate type as a string; a
//! [`CertificateDecoderRegistry`] maps that string to a decoder.

use der::Decode;
use solna_core::Error;
use solna_crypto::pem::{encode_pem, CERTIFICATE_LABEL};

/// Decodes certificate bytes of one type.
pub trait CertificateDecoder: Send + Sync {
    fn decode(&self, der: &[u8]) -> Result<x509_cert::Certificate, Error>;
}

/// DER X.509 certificates.
#[derive(Debug, Clone, Copy, Default)]
pub struct X509Decoder;

impl CertificateDecoder for X509Decoder {
    fn decode(&self, der: &[u8]) -> Result<x509_cert::Certificate, Error> {
        x509_cert::Certificate::from_der(der)
            .map_err(|e| Error::Certificate(format!("failed to parse X.509 certificate: {e}")))
    }
}

/// Certificate decoders keyed by type string.
pub struct CertificateDecoderRegistry {
    decoders: Vec<(String, Box<dyn CertificateDecoder>)>,
}

impl CertificateDecoderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// Registry with `X.509` (and its `X509` spelling) registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("X.509", Box::new(X509Decoder));
        registry.register("X509", Box::new(X509Decoder));
        registry
    }

    /// Register `decoder` for `cert_type`, replacing an earlier registration.
    pub fn register(&mut self, cert_type: impl Into<String>, decoder: Box<dyn CertificateDecoder>) {
        let cert_type = cert_type.into();
        self.decoders.retain(|(t, _)| *t != cert_type);
        self.decoders.push((cert_type, decoder));
    }

    pub fn supports(&self, cert_type: &str) -> bool {
        self.decoders.iter().any(|(t, _)| t == cert_type)
    }

    /// Decode `der` as a certificate of `cert_type`.
    pub fn decode(&self, cert_type: &str, der: Vec<u8>) -> Result<Certificate, Error> {
        let (_, decoder) = self
            .decoders
            .iter()
            .find(|(t, _)| t == cert_type)
            .ok_or_else(|| Error::Certificate(format!("unsupported certificate type: {cert_type}")))?;
        let decoded = decoder.decode(&der)?;
        Ok(Certificate {
            cert_type: cert_type.to_string(),
            der,
            decoded,
        })
    }
}

impl Default for CertificateDecoderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for CertificateDecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.decoders.iter().map(|(t, _)| t))
            .finish()
    }
}

/// A certificate from a keystore entry, kept both raw and decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    cert_type: String,
    der: Vec<u8>,
    decoded: x509_cert::Certificate,
}

impl Certificate {
    /// Type string as stored (or assumed, for version 1 keystores).
    pub fn cert_type(&self) -> &str {
        &self.cert_type
    }

    /// The encoded certificate bytes exactly as stored.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    pub fn decoded(&self) -> &x509_cert::Certificate {
        &self.decoded
    }

    /// Subject distinguished name in RFC 4514 form.
    pub fn subject(&self) -> String {
        self.decoded.tbs_certificate.subject.to_string()
    }

    pub fn issuer(&self) -> String {
        self.decoded.tbs_certificate.issuer.to_string()
    }

    pub fn to_pem(&self) -> Result<String, Error> {
        encode_pem(CERTIFICATE_LABEL, &self.der)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solna_core::ErrorKind;
    use solna_testkit::test_data;

    #[test]
    fn test_decode_x509() {
        let Some(der) = test_data("jks/ca.der") else {
            return;
        };
        let registry = CertificateDecoderRegistry::with_defaults();
        let cert = registry.decode("X.509", der.clone()).unwrap();
        assert_eq!(cert.cert_type(), "X.509");
        assert_eq!(cert.der(), &der[..]);
        assert_eq!(cert.subject(), "CN=Solna Test CA");
        // Self-signed.
        assert_eq!(cert.subject(), cert.issuer());
        assert!(cert.to_pem().unwrap().starts_with("-----BEGIN CERTIFICATE-----\n"));
    }

    #[test]
    fn test_unknown_type() {
        let registry = CertificateDecoderRegistry::with_defaults();
        let err = registry.decode("PGP", vec![1, 2, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Certificate);
    }

    #[test]
    fn test_garbage_certificate() {
        let registry = CertificateDecoderRegistry::with_defaults();
        let err = registry.decode("X.509", vec![0x30, 0x03, 0x02, 0x01, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Certificate);
    }

    #[test]
    fn test_register_replaces() {
        struct Refuse;
        impl CertificateDecoder for Refuse {
            fn decode(&self, _der: &[u8]) -> Result<x509_cert::Certificate, Error> {
                Err(Error::Certificate("refused".into()))
            }
        }

        let Some(der) = test_data("jks/ca.der") else {
            return;
        };
        let mut registry = CertificateDecoderRegistry::with_defaults();
        registry.register("X.509", Box::new(Refuse));
        assert!(registry.decode("X.509", der.clone()).is_err());
        assert!(registry.decode("X509", der).is_ok());
        assert!(registry.supports("X.509"));
        assert!(!registry.supports("PGP"));
    }
}
