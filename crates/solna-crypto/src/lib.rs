#![forbid(unsafe_code)]

//! Cryptographic building blocks for the Solna keystore reader.
//!
//! Provides the digest abstraction used for the keystore checksum, the
//! big-endian UTF-16 password encoding, the legacy key protection keystream
//! and PEM rendering.

pub mod digest;
pub mod keystream;
pub mod password;
pub mod pem;

pub use digest::DigestAlgorithm;
