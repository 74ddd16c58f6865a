#![forbid(unsafe_code)]

//! Recovery of keys protected with the proprietary JKS key protector.
//!
//! The protected blob is `salt || encrypted key || check digest`, where
//! salt and check digest are one digest length each. The encrypted key is
//! XORed with the keystream from [`solna_crypto::keystream`] and the result
//! is accepted only if `H(password || plaintext)` equals the check digest.

use solna_core::{ct_eq, Error, KeystoreConfig};
use solna_crypto::digest::new_digest;
use solna_crypto::keystream::{apply_keystream, derive_keystream, rounds_for};
use solna_crypto::password::password_to_utf16be;
use zeroize::Zeroizing;

use crate::epki::EncryptedPrivateKeyInfo;

/// Decrypts and verifies protected private keys.
#[derive(Debug, Clone, Copy)]
pub struct KeyRecovery<'c> {
    config: &'c KeystoreConfig,
}

impl<'c> KeyRecovery<'c> {
    pub fn new(config: &'c KeystoreConfig) -> Self {
        Self { config }
    }

    /// Recover the plaintext DER private key from `info` using `password`.
    ///
    /// Fails with [`Error::UnsupportedAlgorithm`] for any protection OID other
    /// than the configured one and with [`Error::Integrity`] when the check
    /// digest does not match, which is what a wrong password produces.
    pub fn recover(
        &self,
        info: &EncryptedPrivateKeyInfo,
        password: &str,
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        if info.algorithm_oid != self.config.protection_oid {
            return Err(Error::UnsupportedAlgorithm(format!(
                "key protection algorithm {}",
                info.algorithm_oid
            )));
        }

        let digest_len = self.config.digest_len();
        let blob = &info.encrypted_data;
        if blob.len() <= 2 * digest_len {
            return Err(Error::Format(format!(
                "protected key is {} bytes, need more than {}",
                blob.len(),
                2 * digest_len
            )));
        }

        let (salt, rest) = blob.split_at(digest_len);
        let (encrypted, expected) = rest.split_at(rest.len() - digest_len);

        let password = password_to_utf16be(password);
        let keystream = derive_keystream(self.config.digest, &password, salt, encrypted.len());
        let plaintext = apply_keystream(encrypted, &keystream);

        let mut check = new_digest(self.config.digest);
        check.update(&password);
        check.update(&plaintext);
        let actual = check.finalize();

        if !ct_eq(&actual, expected) {
            return Err(Error::Integrity(
                "protected key digest mismatch (wrong key password?)".into(),
            ));
        }

        tracing::debug!(
            key_len = plaintext.len(),
            rounds = rounds_for(encrypted.len(), digest_len),
            "recovered protected key"
        );
        Ok(plaintext)
    }
}
