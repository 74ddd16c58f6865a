#![forbid(unsafe_code)]

//! Object identifier constants, in dotted-decimal form.
//!
//! These are the strings produced when an OID is decoded from DER and are
//! compared verbatim.

// ── Key protection ───────────────────────────────────────────────────

/// Proprietary JKS key protection algorithm (Sun `KeyProtector`).
pub const JKS_KEY_PROTECTOR: &str = "1.3.6.1.4.1.42.2.17.1.1";

// ── Private key algorithms ───────────────────────────────────────────

pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const DSA: &str = "1.2.840.10040.4.1";
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const ED25519: &str = "1.3.101.112";
