//! Vault module — encrypted single-file secret storage.
//!
//! This module provides:
//! - Store file I/O and mapping serialization (`format`)
//! - The advisory writer lock (`lock`)
//! - The `FileVault` handle with `get` / `set` (`store`)

pub mod format;
pub mod lock;
pub mod store;

// Re-export the most commonly used items.
pub use format::SecretMap;
pub use lock::StoreLock;
pub use store::FileVault;
