//! `secret set` — add or overwrite one value in the store.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, resolve_passphrase, Cli};
use crate::errors::{Result, SecretError};

/// Execute the `set` command.
pub fn execute(cli: &Cli, key: &str, value: Option<&str>) -> Result<()> {
    let secret_value = read_value(key, value)?;

    let passphrase = resolve_passphrase(cli)?;
    let vault = open_vault(cli, &passphrase)?;

    let created = !vault.path().exists();
    vault.set(key, &secret_value)?;

    if created {
        output::info(&format!("Created new store at {}", vault.path().display()));
    }
    output::success(&format!("Value for '{key}' set!"));

    Ok(())
}

/// Determine the value from one of three sources.
fn read_value(key: &str, value: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(v) = value {
        // Source 1: inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        // Source 2: piped input.
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut *buf)?;
        return Ok(Zeroizing::new(strip_line_ending(&buf).to_string()));
    }

    // Source 3: interactive hidden prompt.
    dialoguer::Password::new()
        .with_prompt(format!("Enter value for {key}"))
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| SecretError::CommandFailed(format!("input prompt: {e}")))
}

/// Drop one trailing `\n` or `\r\n`, keeping any other whitespace.
fn strip_line_ending(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}
