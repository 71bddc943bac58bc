//! Log encryption at rest.
//!
//! Maintenance utility, never on the request path. The whole log is sealed
//! into a single Fernet token with a symmetric key kept in its own file.
//! Key and token are both URL-safe base64 text.

use std::fs;
use std::path::Path;

use fernet::Fernet;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// How a key was obtained by [`load_or_generate_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    /// An existing key file was reused.
    Loaded,
    /// No key file existed; a new key was generated and saved.
    Generated,
}

/// Reuse the key at `path`, or generate and persist a new one.
pub fn load_or_generate_key(path: &Path) -> Result<(Fernet, KeyStatus)> {
    if path.exists() {
        return Ok((load_key(path)?, KeyStatus::Loaded));
    }

    let key = Fernet::generate_key();
    let fernet = Fernet::new(&key).ok_or_else(|| Error::InvalidKey(path.to_path_buf()))?;
    write_atomic(path, key.as_bytes())?;
    info!("Generated new encryption key at {}", path.display());
    Ok((fernet, KeyStatus::Generated))
}

/// Read an existing key. A missing file is [`Error::MissingKey`].
pub fn load_key(path: &Path) -> Result<Fernet> {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingKey(path.to_path_buf()));
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    Fernet::new(raw.trim()).ok_or_else(|| Error::InvalidKey(path.to_path_buf()))
}

/// Encrypt the whole of `plain` into `encrypted` with `key`.
pub fn encrypt_file(plain: &Path, encrypted: &Path, key: &Fernet) -> Result<()> {
    let data = fs::read(plain).map_err(|e| Error::io(plain, e))?;

    let token = key.encrypt(&data);
    write_atomic(encrypted, token.as_bytes())?;

    debug!(
        "Encrypted {} ({} bytes) into {}",
        plain.display(),
        data.len(),
        encrypted.display()
    );
    Ok(())
}

/// Decrypt `encrypted` into `plain` using the key stored at `key_path`.
///
/// Never generates a key: without the original key the data is unreadable.
pub fn decrypt_file(encrypted: &Path, plain: &Path, key_path: &Path) -> Result<()> {
    let key = load_key(key_path)?;

    let token = fs::read_to_string(encrypted).map_err(|e| Error::io(encrypted, e))?;
    let data = key
        .decrypt(token.trim())
        .map_err(|_| Error::Decrypt(encrypted.to_path_buf()))?;

    write_atomic(plain, &data)?;

    debug!(
        "Decrypted {} into {} ({} bytes)",
        encrypted.display(),
        plain.display(),
        data.len()
    );
    Ok(())
}

/// Encrypt a log, creating the key on first use.
pub fn seal_log(plain: &Path, encrypted: &Path, key_path: &Path) -> Result<KeyStatus> {
    let (key, status) = load_or_generate_key(key_path)?;
    encrypt_file(plain, encrypted, &key)?;
    Ok(status)
}

/// Write through a sibling temp file so readers never see a partial file.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, contents).map_err(|e| Error::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Error::io(path, e)
    })
}
