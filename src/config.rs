use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Per-pane settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaneSettings {
    #[serde(default)]
    pub start_path: Option<String>,
}

/// Application settings, persisted as JSON so pane positions survive
/// restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Left and right pane settings, in that order.
    #[serde(default = "default_panes")]
    pub panes: Vec<PaneSettings>,
    /// 0 = left, 1 = right.
    #[serde(default)]
    pub active_pane_index: usize,
}

fn default_panes() -> Vec<PaneSettings> {
    vec![PaneSettings::default(), PaneSettings::default()]
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            panes: default_panes(),
            active_pane_index: 0,
        }
    }
}

impl Settings {
    /// Returns the config directory path (~/.twindir)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".twindir"))
    }

    /// Returns the config file path (~/.twindir/settings.json)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    /// Loads settings from the config file, returns defaults if missing or invalid.
    pub fn load() -> Self {
        let Some(config_path) = Self::config_path() else {
            return Settings::default();
        };
        Self::load_from(&config_path).unwrap_or_default()
    }

    fn load_from(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Saves settings using an atomic temp-file-then-rename write.
    pub fn save(&self) -> io::Result<()> {
        let Some(config_dir) = Self::config_dir() else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            ));
        };
        self.save_to_dir(&config_dir)
    }

    fn save_to_dir(&self, config_dir: &Path) -> io::Result<()> {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = fs::Permissions::from_mode(0o700);
                let _ = fs::set_permissions(config_dir, perms);
            }
        }

        let config_path = config_dir.join("settings.json");
        let temp_path = config_dir.join("settings.json.tmp");
        let content = serde_json::to_string_pretty(self)?;

        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &config_path)?;
        Ok(())
    }

    /// Resolves a pane's configured start path to an existing directory,
    /// falling back when the path is relative, missing, or not a directory.
    pub fn resolve_path<F>(path_opt: &Option<String>, fallback: F) -> PathBuf
    where
        F: FnOnce() -> PathBuf,
    {
        if let Some(path_str) = path_opt {
            let path = PathBuf::from(path_str);
            // Relative paths in a persisted file are meaningless across runs.
            if path.is_absolute() {
                if let Ok(canonical) = path.canonicalize() {
                    if canonical.is_dir() {
                        return canonical;
                    }
                }
            }
        }
        fallback()
    }

    /// Start path for the pane at `index`, with `fallback` as the default.
    pub fn pane_start_path<F>(&self, index: usize, fallback: F) -> PathBuf
    where
        F: FnOnce() -> PathBuf,
    {
        let configured = self.panes.get(index).and_then(|p| p.start_path.clone());
        Self::resolve_path(&configured, fallback)
    }
}
