/// Chain account wrapper produced by a successful recovery.
///
/// The vault treats this as an opaque sink: the raw key hex and the
/// optional chain identifier are carried through unvalidated, for the next
/// layer (signer construction, address derivation) to consume.
use std::fmt;

use zeroize::Zeroizing;

pub struct ChainAccount {
    key_hex: Zeroizing<String>,
    chain_id: Option<u64>,
}

impl ChainAccount {
    pub fn new(key_hex: String, chain_id: Option<u64>) -> Self {
        Self {
            key_hex: Zeroizing::new(key_hex),
            chain_id,
        }
    }

    /// Canonical private key hex.
    pub fn key_hex(&self) -> &str {
        &self.key_hex
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }
}

/// Key material never appears in debug output.
impl fmt::Debug for ChainAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainAccount")
            .field("key_hex", &"<redacted>")
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
