//! `secret get` — decrypt the store and print one value.

use crate::cli::{open_vault, resolve_passphrase, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, key: &str) -> Result<()> {
    let passphrase = resolve_passphrase(cli)?;
    let vault = open_vault(cli, &passphrase)?;

    // Print the raw value so the output can be piped.
    let value = vault.get(key)?;
    println!("{value}");

    Ok(())
}
