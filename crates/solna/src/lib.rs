#![forbid(unsafe_code)]

pub use solna_core as core;
pub use solna_crypto as crypto;
pub use solna_jks as jks;
pub use solna_keys as keys;

pub use solna_core::{Error, ErrorKind, KeystoreConfig, Result};
pub use solna_jks::{parse_keystore, Entry, KeyStore, PrivateKeyEntry, TrustedCertEntry};
pub use solna_keys::{Certificate, RecoveredKey};
