#![forbid(unsafe_code)]

//! Java KeyStore (JKS) reading.
//!
//! [`parse_keystore`] turns a keystore image into its entries, verifying the
//! whole-file checksum when a store password is given. Private keys stay
//! protected until [`PrivateKeyEntry::recover`] is called with the key
//! password.
//!
//! ```no_run
//! # fn main() -> solna_core::Result<()> {
//! let data = std::fs::read("server.jks")?;
//! let store = solna_jks::KeyStore::load(&data, Some("changeit"))?;
//! let key = store.recover_key("server", "changeit")?;
//! println!("{}", key.pem.as_str());
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod integrity;
pub mod keystore;
pub mod parse;
pub mod reader;

pub use entry::{Entry, PrivateKeyEntry, TrustedCertEntry};
pub use integrity::IntegrityTrackingReader;
pub use keystore::KeyStore;
pub use parse::ContainerParser;
pub use reader::{ByteSource, StreamReader};

use solna_core::{Error, KeystoreConfig};
use solna_keys::CertificateDecoderRegistry;

/// Parse a JKS image with the default configuration and certificate decoders.
pub fn parse_keystore(data: &[u8], password: Option<&str>) -> Result<Vec<Entry>, Error> {
    let certs = CertificateDecoderRegistry::with_defaults();
    ContainerParser::new(&KeystoreConfig::JKS, &certs).parse(data, password)
}
