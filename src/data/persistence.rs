use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Set once at startup by main() from the --config-dir argument.
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Call this from main() before any load operations.
pub fn set_data_dir(path: PathBuf) {
    let _ = DATA_DIR.set(path);
}

pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = DATA_DIR.get() {
        return Ok(dir.clone());
    }
    // Fallback when running tests or if set_data_dir was not called
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join("config"))
}

pub fn get_file_path(name: &str) -> Result<PathBuf> {
    let dir = get_data_dir()?;
    Ok(dir.join(name))
}

/// Config-file types that know their own filename and format. A missing
/// file falls back to `Default`, so the picker runs without an init step.
pub trait Persistable: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;
    fn is_json() -> bool;

    fn load() -> Result<Self> {
        let path = get_file_path(Self::filename())?;
        Self::load_path(&path)
    }

    /// Load from an explicit directory, bypassing the global `DATA_DIR`.
    fn load_from(dir: &Path) -> Result<Self> {
        Self::load_path(&dir.join(Self::filename()))
    }

    fn load_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if Self::is_json() {
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display()))
        } else {
            serde_norway::from_str(&contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display()))
        }
    }

    /// Save to an explicit directory, creating it when missing.
    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = if Self::is_json() {
            serde_json::to_string_pretty(self).context("failed to serialize JSON")?
        } else {
            serde_norway::to_string(self).context("failed to serialize YAML")?
        };
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
