//! Persistent storage for the Gemini API key.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("writing credential to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Key/value slot for the API credential, read at startup and written on edit.
pub trait CredentialStore {
    fn get(&self) -> Option<String>;
    fn set(&self, value: &str) -> Result<(), CredentialError>;
}

/// Stores the key as the sole content of a file.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<config dir>/redacta/gemini-api-key`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("redacta").join("gemini-api-key"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, value: &str) -> std::io::Result<()> {
        if value.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, value)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        let value = std::fs::read_to_string(&self.path).ok()?;
        let value = value.trim();
        debug!(path = %self.path.display(), "loaded stored credential");
        (!value.is_empty()).then(|| value.to_string())
    }

    fn set(&self, value: &str) -> Result<(), CredentialError> {
        self.write(value).map_err(|source| CredentialError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// The session credential: a non-blank override wins, otherwise the stored key.
pub fn resolve_credential(overridden: Option<String>, store: &dyn CredentialStore) -> String {
    overridden
        .filter(|key| !key.trim().is_empty())
        .or_else(|| store.get())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("key"));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn set_then_get_round_trips_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("redacta").join("key"));
        store.set("AIza-test").unwrap();
        assert_eq!(store.get().as_deref(), Some("AIza-test"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        std::fs::write(&path, "  AIza-test\n").unwrap();
        assert_eq!(
            FileCredentialStore::new(path).get().as_deref(),
            Some("AIza-test")
        );
    }

    #[test]
    fn setting_empty_clears_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("key"));
        store.set("AIza-test").unwrap();
        store.set("").unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.get(), None);
        // Clearing twice is fine.
        store.set("").unwrap();
    }

    #[test]
    fn blank_override_falls_back_to_stored_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("key"));
        store.set("AIza-stored").unwrap();

        assert_eq!(resolve_credential(Some(String::new()), &store), "AIza-stored");
        assert_eq!(resolve_credential(Some("  ".into()), &store), "AIza-stored");
        assert_eq!(resolve_credential(None, &store), "AIza-stored");
        assert_eq!(
            resolve_credential(Some("AIza-flag".into()), &store),
            "AIza-flag"
        );

        store.set("").unwrap();
        assert_eq!(resolve_credential(Some(String::new()), &store), "");
    }
}
