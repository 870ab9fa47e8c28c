//! Settings persistence
//!
//! Sessions never read settings ambiently; callers load them through a
//! [`SettingsStore`] and pass the resulting values in explicitly.

use crate::config::constants::paths;
use crate::config::settings::TranslatorSettings;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load and save [`TranslatorSettings`]
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<TranslatorSettings>;
    fn save(&self, settings: &TranslatorSettings) -> Result<()>;
}

/// TOML file backed settings store
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Store bound to an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the settings file for a workspace
    ///
    /// Looks for `fathertranslator.toml` in the workspace, then
    /// `.fathertranslator/fathertranslator.toml` in the workspace, then the
    /// same under the home directory. When none exists the home location is
    /// used (workspace fallback when no home directory is known).
    pub fn discover(workspace: impl AsRef<Path>) -> Self {
        let workspace = workspace.as_ref();

        let mut candidates = vec![
            workspace.join(paths::SETTINGS_FILE_NAME),
            workspace
                .join(paths::SETTINGS_DIR_NAME)
                .join(paths::SETTINGS_FILE_NAME),
        ];
        let home_path = Self::get_home_dir().map(|home| {
            home.join(paths::SETTINGS_DIR_NAME)
                .join(paths::SETTINGS_FILE_NAME)
        });
        if let Some(home_path) = &home_path {
            candidates.push(home_path.clone());
        }

        if let Some(existing) = candidates.iter().find(|path| path.exists()) {
            return Self::new(existing.clone());
        }

        let fallback = home_path.unwrap_or_else(|| {
            workspace
                .join(paths::SETTINGS_DIR_NAME)
                .join(paths::SETTINGS_FILE_NAME)
        });
        Self::new(fallback)
    }

    /// Resolve from the current directory
    pub fn discover_from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(Self::discover(cwd))
    }

    /// Get the user's home directory path
    fn get_home_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            if !home.is_empty() {
                return Some(PathBuf::from(home));
            }
        }

        if let Ok(userprofile) = std::env::var("USERPROFILE") {
            if !userprofile.is_empty() {
                return Some(PathBuf::from(userprofile));
            }
        }

        dirs::home_dir()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<TranslatorSettings> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(TranslatorSettings::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file: {}", self.path.display()))?;
        let settings = TranslatorSettings::from_toml(&content)
            .with_context(|| format!("Failed to parse settings file: {}", self.path.display()))?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;

        Ok(settings)
    }

    fn save(&self, settings: &TranslatorSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let content =
            toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings file: {}", self.path.display()))?;

        // owner read/write only, the file holds the API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            if let Err(err) = fs::set_permissions(&self.path, permissions) {
                tracing::warn!(error = %err, "failed to restrict settings file permissions");
            }
        }

        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// In-process settings store
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    inner: Arc<RwLock<TranslatorSettings>>,
}

impl MemorySettingsStore {
    pub fn new(settings: TranslatorSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<TranslatorSettings> {
        Ok(self.inner.read().clone())
    }

    fn save(&self, settings: &TranslatorSettings) -> Result<()> {
        *self.inner.write() = settings.clone();
        Ok(())
    }
}
