use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::error::BorderlessResult;
use crate::resolutions::DEFAULT_RESOLUTION;

pub const APP_DIR_NAME: &str = "border_terminator";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub default_resolution: String,
    pub custom_resolutions: Vec<String>,
    pub dpi_aware: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: "info".to_string(),
            default_resolution: DEFAULT_RESOLUTION.to_string(),
            custom_resolutions: Vec::new(),
            dpi_aware: true,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("settings.json"))
}

pub fn read_settings(path: &Path) -> BorderlessResult<Settings> {
    if path.exists() {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let settings: Settings = serde_json::from_reader(reader)?;
        Ok(settings)
    } else {
        Ok(Settings::default())
    }
}

/// Settings from the user's config directory, falling back to defaults.
///
/// Runs before logging is set up, so a bad file is reported on stderr
/// and the error is handed back to be logged once the logger exists.
pub fn load_or_default() -> (Settings, Option<String>) {
    let Some(path) = settings_path() else {
        return (Settings::default(), None);
    };

    match read_settings(&path) {
        Ok(settings) => (settings, None),
        Err(e) => {
            let msg = format!("Ignoring settings at {}: {}", path.display(), e);
            eprintln!("Warning: {}", msg);
            (Settings::default(), Some(msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = read_settings(&dir.path().join("settings.json")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_resolution, "2560x1440");
        assert!(settings.dpi_aware);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "log_level": "debug", "custom_resolutions": ["1024x768"] }}"#
        )
        .unwrap();

        let settings = read_settings(file.path()).unwrap();

        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.custom_resolutions, vec!["1024x768".to_string()]);
        assert_eq!(settings.default_resolution, "2560x1440");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "log_level = debug").unwrap();

        assert!(matches!(
            read_settings(file.path()),
            Err(crate::error::BorderlessError::SettingsFormat(_))
        ));
    }
}
