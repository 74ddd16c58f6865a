#![forbid(unsafe_code)]

//! Table of private key algorithms and how each is exported.
//!
//! Supporting another algorithm means adding a row, not a new code path.

use solna_core::oid;

/// Key families whose inner key octets are decoded and re-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    /// Inner octets are a PKCS#1 `RSAPrivateKey`; exported as `RSA PRIVATE KEY`.
    Rsa,
}

/// How a recovered PKCS#8 structure is turned into its exported form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// The whole PKCS#8 structure is already final; export it as `PRIVATE KEY`.
    PassThrough,
    /// Decode the inner key octets and export the family's own encoding.
    Unwrap(KeyFamily),
}

/// One row of a [`KeyAlgorithmTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAlgorithm {
    pub oid: &'static str,
    pub name: &'static str,
    pub strategy: KeyStrategy,
}

const STANDARD_ALGORITHMS: &[KeyAlgorithm] = &[
    KeyAlgorithm {
        oid: oid::RSA_ENCRYPTION,
        name: "RSA",
        strategy: KeyStrategy::Unwrap(KeyFamily::Rsa),
    },
    KeyAlgorithm {
        oid: oid::DSA,
        name: "DSA",
        strategy: KeyStrategy::PassThrough,
    },
    KeyAlgorithm {
        oid: oid::EC_PUBLIC_KEY,
        name: "EC",
        strategy: KeyStrategy::PassThrough,
    },
    KeyAlgorithm {
        oid: oid::ED25519,
        name: "Ed25519",
        strategy: KeyStrategy::PassThrough,
    },
];

/// Closed mapping from algorithm OID to [`KeyStrategy`].
#[derive(Debug, Clone, Copy)]
pub struct KeyAlgorithmTable {
    rows: &'static [KeyAlgorithm],
}

impl KeyAlgorithmTable {
    /// RSA unwrapped to PKCS#1; DSA, EC and Ed25519 passed through.
    pub const fn standard() -> Self {
        Self {
            rows: STANDARD_ALGORITHMS,
        }
    }

    /// A table with caller-supplied rows.
    pub const fn with_rows(rows: &'static [KeyAlgorithm]) -> Self {
        Self { rows }
    }

    pub fn lookup(&self, oid: &str) -> Option<&'static KeyAlgorithm> {
        self.rows.iter().find(|row| row.oid == oid)
    }

    pub fn rows(&self) -> &'static [KeyAlgorithm] {
        self.rows
    }
}

impl Default for KeyAlgorithmTable {
    fn default() -> Self {
        Self::standard()
    }
}
