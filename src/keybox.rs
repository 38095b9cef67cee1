/// One encrypted private-key slot.
///
/// A box stores a single hex-encoded ciphertext blob, or nothing. The blob
/// decrypts (under some passphrase) to the 64-byte zero-padded scalar
/// handled by `crypto::scalar`. There is no integrity tag: recovery
/// re-validates the scalar range, and that check doubles as the
/// wrong-passphrase signal.
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::{cipher, kdf, scalar};
use crate::error::{Result, VaultError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyBox {
    /// Hex-encoded ciphertext. Field name is stable in persisted records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

impl KeyBox {
    /// A box with no stored key.
    pub fn new() -> Self {
        Self { key: None }
    }

    /// Whether the box holds a ciphertext. An empty persisted string counts
    /// as unset.
    pub fn is_set(&self) -> bool {
        self.ciphertext_hex().is_some()
    }

    /// The stored hex ciphertext, if any.
    pub fn ciphertext_hex(&self) -> Option<&str> {
        self.key.as_deref().filter(|stored| !stored.is_empty())
    }

    /// Validate, pad, and encrypt a key under the passphrase, replacing any
    /// previously stored ciphertext. A replaced key is unrecoverable.
    ///
    /// The stored value is only mutated after every fallible step has
    /// succeeded.
    pub fn set_encrypted(&mut self, raw_key_hex: &str, passphrase: &str) -> Result<()> {
        let key = Zeroizing::new(scalar::parse_key_hex(raw_key_hex)?);
        let padded = Zeroizing::new(scalar::pad_key(&key));
        let cipher_key = kdf::derive_key(passphrase);
        let blob = cipher::encrypt(&cipher_key, padded.as_slice());
        self.key = Some(hex::encode(blob));
        Ok(())
    }

    /// Decrypt the stored ciphertext and return the canonical key hex.
    ///
    /// Fails with `EmptyBox` when nothing is stored and with
    /// `ImplausiblePassphrase` when the decrypted candidate falls outside
    /// the valid scalar range. A wrong passphrase slips past the range check
    /// only with negligible probability; that residual silent-success case
    /// is accepted by the format.
    pub fn recover(&self, passphrase: &str) -> Result<String> {
        let stored = self.ciphertext_hex().ok_or(VaultError::EmptyBox)?;
        let blob =
            hex::decode(stored).map_err(|e| VaultError::MalformedCiphertext(e.to_string()))?;
        let cipher_key = kdf::derive_key(passphrase);
        let plaintext = cipher::decrypt(&cipher_key, &blob)?;
        let key = scalar::candidate_from_plaintext(plaintext.as_bytes())
            .ok_or(VaultError::ImplausiblePassphrase)?;
        Ok(scalar::to_key_hex(&key))
    }
}
