//! Error types for farmdash-core.
//!
//! | Error | Where it comes from | What the caller should do |
//! |-------|---------------------|---------------------------|
//! | [`Error::Storage`] | Reading store | Report "not recorded"; nothing was written |
//! | [`Error::Io`] | Audit log, animal file, vault files | Report and carry on |
//! | [`Error::MissingKey`] | Vault decrypt without a key file | Run encryption first or restore the key |
//! | [`Error::InvalidKey`] | Key file is not a Fernet key | Restore the key file |
//! | [`Error::Decrypt`] | Wrong key or tampered ciphertext | Do not retry |
//! | [`Error::InvalidAnimal`] | Unknown content in the animal file | Set the animal again |
//! | [`Error::Config`] | Configuration file | Fix the file and restart |

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the dashboard core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The reading store failed; the reading was not recorded.
    #[error("Storage error: {0}")]
    Storage(#[from] farmdash_store::Error),

    /// A log, key or data file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decryption was requested but no key file exists.
    #[error("Encryption key not found at {0}")]
    MissingKey(PathBuf),

    /// The key file does not hold a valid Fernet key.
    #[error("Invalid encryption key in {0}")]
    InvalidKey(PathBuf),

    /// The ciphertext could not be decrypted with the given key.
    #[error("Failed to decrypt {0}: wrong key or corrupted file")]
    Decrypt(PathBuf),

    /// The animal file holds something other than a known animal.
    #[error("Invalid animal selection: {0}")]
    InvalidAnimal(#[from] farmdash_types::ParseError),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using farmdash-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingKey(PathBuf::from("secret.key"));
        assert_eq!(err.to_string(), "Encryption key not found at secret.key");

        let err = Error::Decrypt(PathBuf::from("events_encrypted.log"));
        assert!(err.to_string().contains("wrong key"));

        let err = Error::io(
            "events.log",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("I/O error on events.log"));
    }

    #[test]
    fn test_from_parse_error() {
        let err: Error = farmdash_types::ParseError::UnknownAnimal("cat".to_string()).into();
        assert!(matches!(err, Error::InvalidAnimal(_)));
    }
}
