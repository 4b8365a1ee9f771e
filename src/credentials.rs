use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name of the persisted API key under the storage root.
pub const CREDENTIAL_FILE_NAME: &str = "gemini_api_key";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key must not be empty")]
    InvalidCredential,

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Holds the API key for the current process, optionally backed by a file.
///
/// The key is never validated against the remote service at set time;
/// validity is discovered on first use.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    key: Option<String>,
}

impl CredentialStore {
    /// Loads a previously remembered key when the backing file exists.
    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        let path = path.to_path_buf();
        let key = match fs::read_to_string(&path) {
            Ok(raw) => sanitize_key(&raw),
            Err(source) if source.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(CredentialError::Io {
                    operation: "reading API key",
                    path,
                    source,
                })
            }
        };

        Ok(Self { path, key })
    }

    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Stores a key for this process; persists it iff `remember` is set.
    pub fn set(&mut self, key: &str, remember: bool) -> Result<(), CredentialError> {
        let Some(key) = sanitize_key(key) else {
            return Err(CredentialError::InvalidCredential);
        };

        if remember {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(|source| CredentialError::Io {
                    operation: "creating credential directory",
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&self.path, &key).map_err(|source| CredentialError::Io {
                operation: "writing API key",
                path: self.path.clone(),
                source,
            })?;
        }

        self.key = Some(key);
        Ok(())
    }

    /// Path of the key file under a storage root.
    #[must_use]
    pub fn credential_file(root: &Path) -> PathBuf {
        root.join(CREDENTIAL_FILE_NAME)
    }
}

fn sanitize_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
