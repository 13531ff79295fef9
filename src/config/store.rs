//! Persistent configuration store
//!
//! Owns the live [`SecurityConfig`] as an `Arc` behind a lock. Readers take a
//! snapshot and evaluate against it; updates build a new config and swap the
//! `Arc`, so a reader never sees a half-applied change.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use super::document::{self, DocumentFault};
use super::merge::merge_section;
use super::{ConfigError, SecurityConfig};

/// File name of the document inside the base directory
pub const CONFIG_FILE_NAME: &str = "command-security.json";

/// Loads, validates, merges and persists the security configuration
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    current: RwLock<Arc<SecurityConfig>>,
}

impl ConfigStore {
    /// Create a store rooted at `base_dir`, holding the defaults in memory.
    /// Nothing is read or written.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: base_dir.into().join(CONFIG_FILE_NAME),
            current: RwLock::new(Arc::new(SecurityConfig::default())),
        }
    }

    /// Create a store and load the persisted document
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let store = Self::new(base_dir);
        store.reload()?;
        Ok(store)
    }

    /// Path of the configuration document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted document and merge it onto the defaults.
    ///
    /// A missing, empty, malformed or section-less document is replaced by
    /// the defaults. Only a failure to write that replacement is an error.
    /// The live config is not changed; see [`ConfigStore::reload`].
    pub fn load(&self) -> Result<SecurityConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no configuration found, writing defaults");
                return self.write_defaults();
            }
            Err(e) => {
                // Present but unreadable: leave the file alone
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read configuration, using defaults");
                return Ok(SecurityConfig::default());
            }
        };

        match document::parse_section(&content) {
            Ok(section) => Ok(merge_section(&SecurityConfig::default(), &section)),
            Err(fault) => {
                self.log_fault(&fault);
                self.write_defaults()
            }
        }
    }

    /// Load the persisted document and make it the live config
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = self.load()?;
        self.replace(config);
        Ok(())
    }

    /// Copy of the live config
    pub fn get(&self) -> SecurityConfig {
        self.snapshot().as_ref().clone()
    }

    /// Shared handle to the live config
    pub fn snapshot(&self) -> Arc<SecurityConfig> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merge a partial `commandSecurity` object onto the live config and
    /// persist the result. Invalid fields leave their current value.
    ///
    /// The write lock is held from merge to swap, so concurrent updates
    /// apply one after another and the document always matches the live
    /// config.
    pub fn update(&self, partial: &Value) -> Result<(), ConfigError> {
        let Some(section) = partial.as_object() else {
            tracing::warn!(value = %partial, "configuration update is not an object, ignoring");
            return Ok(());
        };

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let updated = merge_section(&current, section);
        self.write(&updated)?;
        *current = Arc::new(updated);
        Ok(())
    }

    /// Write the live config as a fresh document
    pub fn save(&self) -> Result<(), ConfigError> {
        self.write(&self.snapshot())
    }

    /// Overwrite the document with the defaults and make them live
    pub fn regenerate_defaults(&self) -> Result<(), ConfigError> {
        let config = self.write_defaults()?;
        self.replace(config);
        Ok(())
    }

    /// Make sure the document exists, then hand its directory to `opener`
    /// (typically a host callback that reveals it in a file browser).
    pub fn open_folder<F>(&self, opener: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&Path) -> io::Result<()>,
    {
        if !self.path.exists() {
            self.save()?;
        }
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        opener(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn replace(&self, config: SecurityConfig) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(config);
    }

    fn write_defaults(&self) -> Result<SecurityConfig, ConfigError> {
        let config = SecurityConfig::default();
        self.write(&config)?;
        Ok(config)
    }

    fn write(&self, config: &SecurityConfig) -> Result<(), ConfigError> {
        let rendered = document::render(config)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, rendered).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn log_fault(&self, fault: &DocumentFault) {
        tracing::warn!(
            path = %self.path.display(),
            error = %fault,
            "configuration unusable, regenerating defaults"
        );
    }
}
