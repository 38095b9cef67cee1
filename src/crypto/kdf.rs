/// Passphrase-to-key derivation for box encryption.
///
/// Produces the 256-bit AES key as a single SHA-256 digest of the UTF-8
/// passphrase. No salt and no stretching: the digest is pinned by
/// compatibility with already-persisted encrypted boxes.
use sha2::{Digest, Sha256};

use crate::crypto::sensitive::CipherKey;

/// Derive the cipher key for a passphrase. The empty passphrase is a valid
/// input, not an error.
pub fn derive_key(passphrase: &str) -> CipherKey {
    let digest = Sha256::digest(passphrase.as_bytes());
    CipherKey::new(digest.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_deterministic() {
        let k1 = derive_key("my passphrase");
        let k2 = derive_key("my passphrase");
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn test_derive_key_different_passphrase() {
        let k1 = derive_key("passphrase1");
        let k2 = derive_key("passphrase2");
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_is_valid() {
        let k1 = derive_key("");
        let k2 = derive_key("a");
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }
}
