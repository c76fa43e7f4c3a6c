use super::files::atomic_write;
use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default countdown length when `t <task_id>` is given without `--time`
pub const DEFAULT_TIMER_MINUTES: u32 = 1;

/// Timestamp format used in listings
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_timer_minutes")]
    pub default_timer_minutes: u32,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_timer_minutes() -> u32 {
    DEFAULT_TIMER_MINUTES
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_timer_minutes: DEFAULT_TIMER_MINUTES,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Load settings from settings.json file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file: {}", path.display()))?;
    Ok(settings)
}

/// Whether chrono can render every specifier in `format`
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Save settings to settings.json file
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    if settings.default_timer_minutes == 0 {
        anyhow::bail!("default_timer_minutes must be at least 1");
    }
    if !is_valid_date_format(&settings.date_format) {
        anyhow::bail!("invalid date format: {:?}", settings.date_format);
    }
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_timer_minutes, 1);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_timer_minutes": 25}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.default_timer_minutes, 25);
        assert_eq!(settings.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            default_timer_minutes: 50,
            date_format: "%d/%m/%Y".to_string(),
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_save_rejects_zero_minutes() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            default_timer_minutes: 0,
            ..Settings::default()
        };
        assert!(save_settings(&path, &settings).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_date_format_validation() {
        assert!(is_valid_date_format(DEFAULT_DATE_FORMAT));
        assert!(is_valid_date_format("%d/%m/%Y"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y-%"));
    }

    #[test]
    fn test_save_rejects_invalid_date_format() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            date_format: "%Q".to_string(),
            ..Settings::default()
        };
        assert!(save_settings(&path, &settings).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_settings_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_settings(&path).is_err());
    }
}
