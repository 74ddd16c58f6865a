#![forbid(unsafe_code)]

//! Key handling for the Solna keystore reader.
//!
//! Covers the three steps between a stored protected-key blob and a usable
//! private key: decoding the `EncryptedPrivateKeyInfo` wrapper, reversing the
//! legacy password protection, and interpreting the recovered PKCS#8
//! structure through a table of algorithm handling strategies. Certificate
//! decoding is provided here as well.

mod asn1;
pub mod algorithm;
pub mod certificate;
pub mod decoder;
pub mod epki;
pub mod recovery;

pub use algorithm::{KeyAlgorithm, KeyAlgorithmTable, KeyFamily, KeyStrategy};
pub use certificate::{
    Certificate, CertificateDecoder, CertificateDecoderRegistry, X509Decoder,
};
pub use decoder::{KeyContainerDecoder, RecoveredKey};
pub use epki::EncryptedPrivateKeyInfo;
pub use recovery::KeyRecovery;
