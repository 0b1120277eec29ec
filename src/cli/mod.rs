//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SecretError};
use crate::vault::FileVault;

/// secret: local encrypted secret vault.
#[derive(Parser)]
#[command(
    name = "secret",
    about = "Local encrypted secret vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Passphrase the encryption key is derived from (prompted if omitted)
    #[arg(
        short = 'k',
        long,
        env = "SECRET_PASSPHRASE",
        hide_env_values = true,
        global = true
    )]
    pub passphrase: Option<String>,

    /// Store file (default: secrets.db)
    #[arg(short = 'f', long, env = "SECRET_FILE", global = true)]
    pub file: Option<String>,

    /// Skip the advisory lock taken while writing the store
    #[arg(long, global = true)]
    pub no_lock: bool,

    /// Increase log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Print the value stored under a key
    Get {
        /// Key name
        key: String,
    },

    /// Store a value under a key (add or overwrite)
    Set {
        /// Key name
        key: String,
        /// Value (omit to read from stdin or a hidden prompt)
        value: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Install the global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `-v` picks the level.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Get the passphrase, trying in order:
/// 1. `-k/--passphrase` or the `SECRET_PASSPHRASE` env var
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn resolve_passphrase(cli: &Cli) -> Result<Zeroizing<String>> {
    let passphrase = match &cli.passphrase {
        Some(pw) => pw.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Enter vault passphrase")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| SecretError::CommandFailed(format!("passphrase prompt: {e}")))?,
    };

    if passphrase.is_empty() {
        return Err(SecretError::CommandFailed(
            "passphrase cannot be empty".into(),
        ));
    }

    Ok(Zeroizing::new(passphrase))
}

/// Resolve the store path and locking mode, then bind the vault.
///
/// Path order: `-f` / `SECRET_FILE`, then `store_path` from
/// `.secret.toml`, then `secrets.db`.
pub fn open_vault(cli: &Cli, passphrase: &str) -> Result<FileVault> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;

    let path = settings.resolve_store_path(&cwd, cli.file.as_deref());
    let locking = settings.lock && !cli.no_lock;
    tracing::debug!(path = %path.display(), locking, "opening vault");

    Ok(FileVault::open(passphrase, path).with_locking(locking))
}
