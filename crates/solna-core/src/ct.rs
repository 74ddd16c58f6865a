#![forbid(unsafe_code)]

//! Comparison of digest values.

/// Digest equality that inspects every byte.
///
/// Used for both the keystore checksum and the per-key check digest. Digest
/// lengths are fixed by the format and not secret, so unequal lengths return
/// `false` at once; equal-length inputs are always scanned in full.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
