/// Placeholder key generation.
///
/// Every slot in a fresh collection is seeded with a syntactically valid
/// throwaway key so that index access never meets an empty box. Keys come
/// from a random derivation index into a freshly generated mnemonic
/// keychain, and are encrypted under a fixed, well-known passphrase.
use bip32::{DerivationPath, XPrv};
use bip39::Mnemonic;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Result, VaultError};

/// Passphrase under which placeholder keys are encrypted. Well known by
/// design: a placeholder protects nothing.
pub const PLACEHOLDER_PASSPHRASE: &str = "keyvault.placeholder.v1";

/// Entropy length for the throwaway mnemonic (12 words).
const MNEMONIC_ENTROPY_LEN: usize = 16;

/// Non-hardened child indices are 31-bit.
const CHILD_INDEX_MASK: u32 = 0x7fff_ffff;

/// Generate one placeholder key as canonical hex.
///
/// Draws mnemonic entropy and a child index from `rng`, then derives the
/// child private key at a BIP-44 style path. The index mask keeps the
/// drawn value inside the non-hardened child-index domain.
pub fn placeholder_key_hex<R: RngCore + CryptoRng>(rng: &mut R) -> Result<String> {
    let mut entropy = [0u8; MNEMONIC_ENTROPY_LEN];
    rng.fill_bytes(&mut entropy);
    let mnemonic =
        Mnemonic::from_entropy(&entropy).map_err(|e| VaultError::KeyDerivation(e.to_string()))?;
    let seed = Zeroizing::new(mnemonic.to_seed(""));

    let mut index_bytes = [0u8; 4];
    rng.fill_bytes(&mut index_bytes);
    let index = u32::from_be_bytes(index_bytes) & CHILD_INDEX_MASK;

    let path: DerivationPath = format!("m/44'/60'/0'/0/{index}")
        .parse()
        .map_err(|e: bip32::Error| VaultError::KeyDerivation(e.to_string()))?;
    let child = XPrv::derive_from_path(seed.as_slice(), &path)
        .map_err(|e| VaultError::KeyDerivation(e.to_string()))?;

    Ok(hex::encode(child.private_key().to_bytes()))
}
