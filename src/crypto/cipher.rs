/// AES-256-CBC encryption of padded key plaintext.
///
/// The box format stores no IV: encryption runs CBC with an all-zero IV, so
/// a given key and plaintext always produce the same blob. PKCS#7 padding
/// always appends a full block to the block-aligned plaintext.
use aes::cipher::block_padding::{NoPadding, Pkcs7};
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::crypto::sensitive::{CipherKey, Plaintext};
use crate::error::{Result, VaultError};

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Fixed IV; the format has no per-blob IV field.
const IV: [u8; BLOCK_LEN] = [0u8; BLOCK_LEN];

/// Encrypt plaintext, appending PKCS#7 padding.
pub fn encrypt(key: &CipherKey, plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.as_bytes().into(), &IV.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt a stored blob.
///
/// PKCS#7 padding is stripped when it is well formed. A wrong key usually
/// garbles the final padding byte; in that case the raw decrypted blocks are
/// returned unstripped and the caller's range validation decides whether the
/// candidate is plausible. Invalid padding is never itself treated as a
/// wrong-passphrase signal.
pub fn decrypt(key: &CipherKey, ciphertext: &[u8]) -> Result<Plaintext> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(VaultError::MalformedCiphertext(format!(
            "ciphertext length {} is not a positive multiple of {BLOCK_LEN}",
            ciphertext.len()
        )));
    }

    let plaintext = match Aes256CbcDec::new(key.as_bytes().into(), &IV.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
    {
        Ok(stripped) => stripped,
        Err(_) => Aes256CbcDec::new(key.as_bytes().into(), &IV.into())
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
            .map_err(|e| VaultError::MalformedCiphertext(e.to_string()))?,
    };

    Ok(Plaintext::new(plaintext))
}
