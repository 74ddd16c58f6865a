#![forbid(unsafe_code)]

//! Alias lookup over a parsed keystore.

use solna_core::{Error, KeystoreConfig};
use solna_keys::{Certificate, CertificateDecoderRegistry, RecoveredKey};

use crate::entry::{Entry, PrivateKeyEntry};
use crate::parse::ContainerParser;

/// A parsed keystore with its entries in file order.
#[derive(Debug, Clone)]
pub struct KeyStore {
    config: KeystoreConfig,
    entries: Vec<Entry>,
}

impl KeyStore {
    /// Parse a JKS image with the default certificate decoders.
    pub fn load(data: &[u8], password: Option<&str>) -> Result<Self, Error> {
        Self::load_with(
            data,
            password,
            KeystoreConfig::JKS,
            &CertificateDecoderRegistry::with_defaults(),
        )
    }

    pub fn load_with(
        data: &[u8],
        password: Option<&str>,
        config: KeystoreConfig,
        certs: &CertificateDecoderRegistry,
    ) -> Result<Self, Error> {
        let entries = ContainerParser::new(&config, certs).parse(data, password)?;
        Ok(Self { config, entries })
    }

    pub fn config(&self) -> &KeystoreConfig {
        &self.config
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::alias)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry; aliases compare ASCII case-insensitively.
    pub fn get(&self, alias: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.alias().eq_ignore_ascii_case(alias))
    }

    pub fn private_key(&self, alias: &str) -> Option<&PrivateKeyEntry> {
        self.get(alias).and_then(Entry::as_private_key)
    }

    pub fn trusted_certificate(&self, alias: &str) -> Option<&Certificate> {
        self.get(alias)
            .and_then(Entry::as_trusted_cert)
            .map(|e| &e.certificate)
    }

    /// Recover the private key stored under `alias`.
    pub fn recover_key(&self, alias: &str, password: &str) -> Result<RecoveredKey, Error> {
        let entry = self
            .private_key(alias)
            .ok_or_else(|| Error::KeyNotFound(alias.to_string()))?;
        entry.recover(password, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solna_core::ErrorKind;
    use solna_testkit::KeystoreBuilder;

    fn store() -> KeyStore {
        let data = KeystoreBuilder::new()
            .private_key_with_chain_count("Server", 1, vec![0; 4], 0)
            .private_key_with_chain_count("backup", 2, vec![1; 4], -3)
            .build(Some("pw"));
        KeyStore::load(&data, Some("pw")).unwrap()
    }

    #[test]
    fn test_lookup() {
        let ks = store();
        assert_eq!(ks.len(), 2);
        assert!(!ks.is_empty());
        assert_eq!(ks.aliases().collect::<Vec<_>>(), ["Server", "backup"]);
        assert_eq!(ks.get("server").unwrap().timestamp_ms(), 1);
        assert_eq!(ks.get("BACKUP").unwrap().alias(), "backup");
        assert!(ks.get("missing").is_none());
        assert!(ks.private_key("backup").is_some());
        assert!(ks.trusted_certificate("backup").is_none());
    }

    #[test]
    fn test_recover_missing_alias() {
        let err = store().recover_key("nope", "pw").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_recover_garbage_blob() {
        let err = store().recover_key("server", "pw").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptKey);
    }

    #[test]
    fn test_wrong_store_password() {
        let data = KeystoreBuilder::new().build(Some("pw"));
        let err = KeyStore::load(&data, Some("other")).unwrap_err();
        assert!(err.is_wrong_password());
    }
}
