//! Cryptographic primitives for the secret vault.
//!
//! This module provides:
//! - SHA-256 passphrase-to-key derivation (`kdf`)
//! - AES-256-GCM encryption and decryption with a detached tag (`encryption`)

pub mod encryption;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt, HEADER_LEN, NONCE_LEN, TAG_LEN};
pub use kdf::{derive_key, DerivedKey, KEY_LEN};
