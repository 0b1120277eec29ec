use thiserror::Error;

/// All errors that can occur in the secret vault.
#[derive(Debug, Error)]
pub enum SecretError {
    // --- Lookup errors ---
    #[error("key '{0}' not found")]
    KeyNotFound(String),

    // --- Crypto errors ---
    #[error("Integrity check failed — wrong passphrase or tampered store file")]
    IntegrityError,

    #[error("Malformed ciphertext: {len} bytes, need at least {min}")]
    MalformedInput { len: usize, min: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Store errors ---
    #[error("Corrupt store: {0}")]
    CorruptStore(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for vault results.
pub type Result<T> = std::result::Result<T, SecretError>;
