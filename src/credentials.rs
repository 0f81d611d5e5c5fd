//! Bearer token storage.
//!
//! The token lives in a single-value file named `token` next to the
//! configuration file. The `DOCMOST_TOKEN` environment variable takes
//! precedence over the stored value.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::configuration::Configuration;

pub const TOKEN_ENV: &str = "DOCMOST_TOKEN";
pub const TOKEN_FILE_NAME: &str = "token";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to read token file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write token file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to delete token file {path:?}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    file_path: PathBuf,
}

impl TokenStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn in_dir(directory: &Path) -> Self {
        Self::new(directory.join(TOKEN_FILE_NAME))
    }

    pub fn default_location() -> Result<Self, CredentialError> {
        let directory = Configuration::default_configuration_dir()
            .map_err(|_| CredentialError::FailedToFindConfigurationDirectory)?;
        Ok(Self::in_dir(&directory))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Token from `DOCMOST_TOKEN`, else the stored one.
    pub fn get(&self) -> Result<Option<String>, CredentialError> {
        self.resolve(std::env::var(TOKEN_ENV).ok())
    }

    pub fn resolve(&self, env_token: Option<String>) -> Result<Option<String>, CredentialError> {
        match env_token.filter(|token| !token.is_empty()) {
            Some(token) => Ok(Some(token)),
            None => self.stored(),
        }
    }

    /// The trimmed content of the token file, if any.
    pub fn stored(&self) -> Result<Option<String>, CredentialError> {
        match fs::read_to_string(&self.file_path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CredentialError::Read {
                path: self.file_path.clone(),
                source,
            }),
        }
    }

    /// Writes the token, readable by the owner only.
    pub fn save(&self, token: &str) -> Result<(), CredentialError> {
        let write_error = |source: io::Error| CredentialError::Write {
            path: self.file_path.clone(),
            source,
        };

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        write_private(&self.file_path, token).map_err(write_error)?;
        debug!("Token saved to {}", self.file_path.display());
        Ok(())
    }

    /// Removes the stored token. Returns false when there was none.
    pub fn delete(&self) -> Result<bool, CredentialError> {
        match fs::remove_file(&self.file_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CredentialError::Delete {
                path: self.file_path.clone(),
                source,
            }),
        }
    }

    pub fn is_authenticated(&self) -> Result<bool, CredentialError> {
        Ok(self.get()?.is_some())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents.as_bytes())?;
    // mode() only applies on creation
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)
}
