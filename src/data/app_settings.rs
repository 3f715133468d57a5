use crate::data::persistence::Persistable;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// Consecutive months rendered, counting from the current month.
    pub number_of_months: u32,
    /// How long a press must be held before it becomes a drag gesture.
    pub hold_threshold_ms: u64,
    /// Name table for month and weekday labels ("english" or "spanish").
    pub locale: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            number_of_months: 3,
            hold_threshold_ms: 150,
            locale: "english".to_string(),
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml, so the file can
/// grow unrelated top-level keys without breaking this reader.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }
}
