#![forbid(unsafe_code)]

//! Keystream of the legacy JKS key protection scheme.
//!
//! Round 0 hashes `password || salt`, round `i` hashes `password || H(i-1)`.
//! Each round contributes one digest worth of keystream; the last round is
//! cut to the bytes still needed.

use solna_core::DigestKind;
use zeroize::Zeroizing;

use crate::digest::new_digest;

/// Number of digest rounds needed to cover `len` bytes.
pub fn rounds_for(len: usize, digest_len: usize) -> usize {
    len.div_ceil(digest_len)
}

/// Derive exactly `len` keystream bytes from `password` and `salt`.
///
/// `password` is the encoded password (see [`crate::password`]).
pub fn derive_keystream(
    kind: DigestKind,
    password: &[u8],
    salt: &[u8],
    len: usize,
) -> Zeroizing<Vec<u8>> {
    let rounds = rounds_for(len, kind.output_len());
    let mut stream = Zeroizing::new(Vec::with_capacity(len));
    let mut chain = Zeroizing::new(salt.to_vec());

    for _ in 0..rounds {
        let mut hasher = new_digest(kind);
        hasher.update(password);
        hasher.update(&chain);
        let block = Zeroizing::new(hasher.finalize());

        let take = (len - stream.len()).min(block.len());
        stream.extend_from_slice(&block[..take]);
        chain = block;
    }

    tracing::trace!(rounds, len, "derived key protection keystream");
    stream
}

/// XOR `data` with `keystream` of the same length.
pub fn apply_keystream(data: &[u8], keystream: &[u8]) -> Zeroizing<Vec<u8>> {
    debug_assert_eq!(data.len(), keystream.len());
    Zeroizing::new(
        data.iter()
            .zip(keystream.iter())
            .map(|(d, k)| d ^ k)
            .collect(),
    )
}
