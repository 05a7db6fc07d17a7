use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tempfile::NamedTempFile;

pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";
pub const NAV_SECTION_STATES_KEY: &str = "navSectionStates";
pub const THEME_KEY: &str = "theme";

/// Persisted key-value preferences, the desktop counterpart of browser local storage.
///
/// With no backing file the store lives in memory only.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    values: BTreeMap<String, String>,
    file_path: Option<PathBuf>,
}

impl PreferenceStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at `file_path`, creating its directory. A missing file
    /// starts empty; an unreadable one starts empty with a warning.
    pub fn open(file_path: PathBuf) -> Result<Self, std::io::Error> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let values = match fs::read_to_string(&file_path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("Ignoring corrupt preferences at {}: {}", file_path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            values,
            file_path: Some(file_path),
        })
    }

    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("socguide")
            .join("preferences.json")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), std::io::Error> {
        self.values.insert(key.to_string(), value.into());
        self.flush()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> Result<(), std::io::Error> {
        self.set(key, value.to_string())
    }

    /// Reads a JSON-encoded map stored under `key`; anything unparsable is empty.
    pub fn get_map(&self, key: &str) -> BTreeMap<String, String> {
        self.get(key)
            .and_then(|text| serde_json::from_str(text).ok())
            .unwrap_or_default()
    }

    pub fn set_map(
        &mut self,
        key: &str,
        map: &BTreeMap<String, String>,
    ) -> Result<(), std::io::Error> {
        let text = serde_json::to_string(map)?;
        self.set(key, text)
    }

    fn flush(&self) -> Result<(), std::io::Error> {
        let Some(file_path) = &self.file_path else {
            return Ok(());
        };
        let dir = file_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let temp_file = NamedTempFile::new_in(&dir)?;
        fs::write(&temp_file, serde_json::to_string_pretty(&self.values)?)?;
        temp_file.persist(file_path)?;
        log::debug!("Preferences saved to {}", file_path.display());
        Ok(())
    }
}

/// Logs instead of failing; a lost preference write never breaks the page.
pub fn log_persist_error(result: Result<(), std::io::Error>, what: &str) {
    if let Err(e) = result {
        log::error!("Failed to persist {}: {}", what, e);
    }
}
