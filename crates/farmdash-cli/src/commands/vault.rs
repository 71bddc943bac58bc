//! Log vault commands - encrypt and decrypt the event log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use farmdash_core::KeyStatus;
use farmdash_core::vault;

use super::CommandContext;
use crate::style;

pub fn cmd_encrypt_log(
    ctx: &CommandContext,
    input: Option<PathBuf>,
    to: Option<PathBuf>,
) -> Result<()> {
    let plain = input.unwrap_or_else(|| ctx.config.storage.log.clone());
    let encrypted = to.unwrap_or_else(|| ctx.config.vault.encrypted_log.clone());
    let key = &ctx.config.vault.key;

    let status = vault::seal_log(&plain, &encrypted, key)
        .with_context(|| format!("Failed to encrypt {}", plain.display()))?;

    if !ctx.quiet {
        if status == KeyStatus::Generated {
            println!(
                "{}",
                style::format_info(
                    &format!("Generated new key at {}", key.display()),
                    ctx.opts.no_color
                )
            );
        }
        println!(
            "{}",
            style::format_success(
                &format!("Encrypted log written to {}", encrypted.display()),
                ctx.opts.no_color
            )
        );
    }
    Ok(())
}

pub fn cmd_decrypt_log(
    ctx: &CommandContext,
    input: Option<PathBuf>,
    to: Option<PathBuf>,
) -> Result<()> {
    let encrypted = input.unwrap_or_else(|| ctx.config.vault.encrypted_log.clone());
    let plain = to.unwrap_or_else(|| ctx.config.vault.decrypted_log.clone());

    vault::decrypt_file(&encrypted, &plain, &ctx.config.vault.key)
        .with_context(|| format!("Failed to decrypt {}", encrypted.display()))?;

    if !ctx.quiet {
        println!(
            "{}",
            style::format_success(
                &format!("Decrypted log written to {}", plain.display()),
                ctx.opts.no_color
            )
        );
    }
    Ok(())
}
