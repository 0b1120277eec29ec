//! Configuration loaded from `.secret.toml`.

pub mod settings;

pub use settings::Settings;
