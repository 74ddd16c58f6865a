#![forbid(unsafe_code)]

//! Test fixtures for Solna.
//!
//! Writes keystore images and protected keys so the reader can be tested
//! against inputs with known contents. Nothing here is used by the library
//! crates themselves; the hashing is done with `sha1` directly so the tests
//! do not check the reader against itself.

use sha1::{Digest, Sha1};
use yasna::models::ObjectIdentifier;

pub const MAGIC: u32 = 0xFEED_FEED;
pub const WHITENER: &[u8] = b"Mighty Aphrodite";
pub const TAG_PRIVATE_KEY: u32 = 1;
pub const TAG_TRUSTED_CERT: u32 = 2;
pub const DIGEST_LEN: usize = 20;

pub fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

pub fn flip_byte(buf: &mut [u8], index: usize) {
    if buf.is_empty() {
        return;
    }

    let idx = index % buf.len();
    buf[idx] ^= 0xFF;
}

pub fn utf16be(password: &str) -> Vec<u8> {
    password.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
}

/// Forward JKS key protection: returns `salt || encrypted || SHA1(password || plaintext)`.
pub fn protect_key(plaintext: &[u8], password: &str, salt: &[u8; DIGEST_LEN]) -> Vec<u8> {
    let pw = utf16be(password);

    let mut out = Vec::with_capacity(plaintext.len() + 2 * DIGEST_LEN);
    out.extend_from_slice(salt);

    let mut prev = salt.to_vec();
    for chunk in plaintext.chunks(DIGEST_LEN) {
        let block = Sha1::new().chain_update(&pw).chain_update(&prev).finalize();
        out.extend(chunk.iter().zip(block.iter()).map(|(p, k)| p ^ k));
        prev = block.to_vec();
    }

    let check = Sha1::new().chain_update(&pw).chain_update(plaintext).finalize();
    out.extend_from_slice(&check);
    out
}

fn parse_oid(dotted: &str) -> ObjectIdentifier {
    let components: Vec<u64> = dotted
        .split('.')
        .map(|c| c.parse().expect("numeric OID component"))
        .collect();
    ObjectIdentifier::from_slice(&components)
}

/// DER `EncryptedPrivateKeyInfo { AlgorithmIdentifier { oid, NULL }, OCTET STRING }`.
pub fn wrap_encrypted_key(oid: &str, blob: &[u8]) -> Vec<u8> {
    let oid = parse_oid(oid);
    yasna::construct_der(|w| {
        w.write_sequence(|w| {
            w.next().write_sequence(|w| {
                w.next().write_oid(&oid);
                w.next().write_null();
            });
            w.next().write_bytes(blob);
        })
    })
}

/// DER PKCS#8 `PrivateKeyInfo` with arbitrary version, algorithm and key octets.
pub fn private_key_info(version: i64, oid: &str, key: &[u8]) -> Vec<u8> {
    let oid = parse_oid(oid);
    yasna::construct_der(|w| {
        w.write_sequence(|w| {
            w.next().write_i64(version);
            w.next().write_sequence(|w| {
                w.next().write_oid(&oid);
                w.next().write_null();
            });
            w.next().write_bytes(key);
        })
    })
}

/// `SHA1(utf16be(password) || whitener || data)`.
pub fn keystore_checksum(password: &str, data: &[u8]) -> Vec<u8> {
    Sha1::new()
        .chain_update(utf16be(password))
        .chain_update(WHITENER)
        .chain_update(data)
        .finalize()
        .to_vec()
}

enum EntryLayout {
    PrivateKey {
        alias: String,
        timestamp: i64,
        protected_key: Vec<u8>,
        chain_count: i32,
        chain: Vec<Vec<u8>>,
    },
    TrustedCert {
        alias: String,
        timestamp: i64,
        cert_type: String,
        der: Vec<u8>,
    },
    Unknown {
        tag: u32,
        alias: String,
        timestamp: i64,
    },
}

/// Writes keystore images entry by entry.
pub struct KeystoreBuilder {
    magic: u32,
    version: u32,
    count: Option<u32>,
    entries: Vec<EntryLayout>,
}

impl KeystoreBuilder {
    /// Version 2 keystore with no entries.
    pub fn new() -> Self {
        Self {
            magic: MAGIC,
            version: 2,
            count: None,
            entries: Vec::new(),
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    /// Override the stored entry count.
    pub fn entry_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn private_key(
        mut self,
        alias: &str,
        timestamp: i64,
        protected_key: Vec<u8>,
        chain: Vec<Vec<u8>>,
    ) -> Self {
        self.entries.push(EntryLayout::PrivateKey {
            alias: alias.to_string(),
            timestamp,
            protected_key,
            chain_count: chain.len() as i32,
            chain,
        });
        self
    }

    /// Private key entry whose chain count field is `chain_count` and no certificates follow.
    pub fn private_key_with_chain_count(
        mut self,
        alias: &str,
        timestamp: i64,
        protected_key: Vec<u8>,
        chain_count: i32,
    ) -> Self {
        self.entries.push(EntryLayout::PrivateKey {
            alias: alias.to_string(),
            timestamp,
            protected_key,
            chain_count,
            chain: Vec::new(),
        });
        self
    }

    pub fn trusted_cert(self, alias: &str, timestamp: i64, der: Vec<u8>) -> Self {
        self.trusted_cert_typed(alias, timestamp, "X.509", der)
    }

    pub fn trusted_cert_typed(
        mut self,
        alias: &str,
        timestamp: i64,
        cert_type: &str,
        der: Vec<u8>,
    ) -> Self {
        self.entries.push(EntryLayout::TrustedCert {
            alias: alias.to_string(),
            timestamp,
            cert_type: cert_type.to_string(),
            der,
        });
        self
    }

    /// Entry with an arbitrary tag followed only by alias and timestamp.
    pub fn unknown_entry(mut self, tag: u32, alias: &str, timestamp: i64) -> Self {
        self.entries.push(EntryLayout::Unknown {
            tag,
            alias: alias.to_string(),
            timestamp,
        });
        self
    }

    /// Serialize; a checksum is appended when `password` is given.
    pub fn build(&self, password: Option<&str>) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.magic.to_be_bytes());
        buf.extend_from_slice(&self.version.to_be_bytes());
        let count = self.count.unwrap_or(self.entries.len() as u32);
        buf.extend_from_slice(&count.to_be_bytes());

        for entry in &self.entries {
            match entry {
                EntryLayout::PrivateKey {
                    alias,
                    timestamp,
                    protected_key,
                    chain_count,
                    chain,
                } => {
                    buf.extend_from_slice(&TAG_PRIVATE_KEY.to_be_bytes());
                    write_utf(&mut buf, alias);
                    buf.extend_from_slice(&timestamp.to_be_bytes());
                    write_bytes(&mut buf, protected_key);
                    buf.extend_from_slice(&chain_count.to_be_bytes());
                    for cert in chain {
                        if self.version == 2 {
                            write_utf(&mut buf, "X.509");
                        }
                        write_bytes(&mut buf, cert);
                    }
                }
                EntryLayout::TrustedCert {
                    alias,
                    timestamp,
                    cert_type,
                    der,
                } => {
                    buf.extend_from_slice(&TAG_TRUSTED_CERT.to_be_bytes());
                    write_utf(&mut buf, alias);
                    buf.extend_from_slice(&timestamp.to_be_bytes());
                    if self.version == 2 {
                        write_utf(&mut buf, cert_type);
                    }
                    write_bytes(&mut buf, der);
                }
                EntryLayout::Unknown {
                    tag,
                    alias,
                    timestamp,
                } => {
                    buf.extend_from_slice(&tag.to_be_bytes());
                    write_utf(&mut buf, alias);
                    buf.extend_from_slice(&timestamp.to_be_bytes());
                }
            }
        }

        if let Some(password) = password {
            let checksum = keystore_checksum(password, &buf);
            buf.extend_from_slice(&checksum);
        }
        buf
    }
}

impl Default for KeystoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_utf(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u16).to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
}

fn write_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
    buf.extend_from_slice(data);
}

/// Read a file from the workspace `test-data/` directory.
///
/// Returns `None` (after noting it on stderr) when the file is missing so
/// callers can skip.
pub fn test_data(relative: &str) -> Option<Vec<u8>> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-data")
        .join(relative);
    if !path.exists() {
        eprintln!("skipping test: {path:?} not found");
        return None;
    }
    Some(std::fs::read(&path).expect("read test data"))
}
