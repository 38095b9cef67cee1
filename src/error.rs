use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Invalid private key format")]
    InvalidKeyFormat,

    #[error("Box holds no encrypted key")]
    EmptyBox,

    #[error("Decrypted key is implausible; passphrase is likely wrong")]
    ImplausiblePassphrase,

    #[error("Box collection is not initialized")]
    NotInitialized,

    #[error("Box index {0} is out of range")]
    IndexOutOfRange(usize),

    #[error("Persisted collection holds {actual} boxes, expected {expected}")]
    WrongBoxCount { expected: usize, actual: usize },

    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
