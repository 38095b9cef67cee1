/// Fixed-size collection of encrypted key boxes.
///
/// The collection owns exactly `BOX_COUNT` boxes and only ever indexes into
/// them; all cryptographic work lives in `KeyBox`. A freshly deserialized
/// record may carry no boxes at all, and every operation fails fast on that
/// state until the collection has been initialized.
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::account::ChainAccount;
use crate::error::{Result, VaultError};
use crate::keybox::KeyBox;
use crate::placeholder::{self, PLACEHOLDER_PASSPHRASE};

/// Number of key slots in every collection. Fixed for the lifetime of the
/// persisted format.
pub const BOX_COUNT: usize = 64;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxCollection {
    /// `None` until initialized. Field name is stable in persisted records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    boxes: Option<Vec<KeyBox>>,
}

impl BoxCollection {
    /// A collection in the uninitialized state.
    pub fn new() -> Self {
        Self { boxes: None }
    }

    /// Build a fully populated collection: every slot holds a fresh
    /// placeholder key encrypted under `PLACEHOLDER_PASSPHRASE`, so index
    /// access never meets an empty box.
    pub fn make_empty<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut boxes = Vec::with_capacity(BOX_COUNT);
        for _ in 0..BOX_COUNT {
            let mut slot = KeyBox::new();
            slot.set_encrypted(&placeholder::placeholder_key_hex(rng)?, PLACEHOLDER_PASSPHRASE)?;
            boxes.push(slot);
        }
        debug!(count = BOX_COUNT, "box collection initialized with placeholder keys");
        Ok(Self { boxes: Some(boxes) })
    }

    /// `make_empty` with the operating system CSPRNG.
    pub fn make_empty_os() -> Result<Self> {
        Self::make_empty(&mut OsRng)
    }

    pub fn is_initialized(&self) -> bool {
        self.boxes.is_some()
    }

    /// Check the initialized state and the persisted length invariant.
    /// Useful right after deserializing a stored record.
    pub fn validate(&self) -> Result<()> {
        self.slots().map(|_| ())
    }

    fn slots(&self) -> Result<&[KeyBox]> {
        let boxes = self.boxes.as_deref().ok_or(VaultError::NotInitialized)?;
        if boxes.len() != BOX_COUNT {
            return Err(VaultError::WrongBoxCount {
                expected: BOX_COUNT,
                actual: boxes.len(),
            });
        }
        Ok(boxes)
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut KeyBox> {
        let boxes = self.boxes.as_deref_mut().ok_or(VaultError::NotInitialized)?;
        if boxes.len() != BOX_COUNT {
            return Err(VaultError::WrongBoxCount {
                expected: BOX_COUNT,
                actual: boxes.len(),
            });
        }
        boxes.get_mut(index).ok_or(VaultError::IndexOutOfRange(index))
    }

    /// Borrow the box at `index`.
    pub fn get(&self, index: usize) -> Result<&KeyBox> {
        self.slots()?
            .get(index)
            .ok_or(VaultError::IndexOutOfRange(index))
    }

    /// Encrypt `raw_key_hex` into the box at `index`, replacing its previous
    /// content. An absent passphrase is the empty string, never an error.
    pub fn set_encrypted(
        &mut self,
        index: usize,
        raw_key_hex: &str,
        passphrase: Option<&str>,
    ) -> Result<()> {
        self.slot_mut(index)?
            .set_encrypted(raw_key_hex, passphrase.unwrap_or(""))
    }

    /// Put a fresh placeholder key into the box at `index`. Destructive and
    /// irreversible: whatever the box held before is gone.
    pub fn reset<R: RngCore + CryptoRng>(&mut self, index: usize, rng: &mut R) -> Result<()> {
        let key_hex = placeholder::placeholder_key_hex(rng)?;
        self.slot_mut(index)?
            .set_encrypted(&key_hex, PLACEHOLDER_PASSPHRASE)?;
        debug!(index, "box reset to a placeholder key");
        Ok(())
    }

    /// `reset` with the operating system CSPRNG.
    pub fn reset_os(&mut self, index: usize) -> Result<()> {
        self.reset(index, &mut OsRng)
    }

    /// Recover the key at `index` and wrap it for the given chain. The chain
    /// id is passed through untouched.
    pub fn recover(
        &self,
        index: usize,
        passphrase: Option<&str>,
        chain_id: Option<u64>,
    ) -> Result<ChainAccount> {
        let key_hex = self.get(index)?.recover(passphrase.unwrap_or(""))?;
        Ok(ChainAccount::new(key_hex, chain_id))
    }
}
