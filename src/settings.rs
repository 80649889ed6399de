use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ClaimsError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    /// Month selected with `quickclaims month`, as `YYYY-MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_month: Option<String>,
    #[serde(default = "default_ocr_key")]
    pub ocr_key: String,
}

fn default_ocr_key() -> String {
    "helloworld".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            active_month: None,
            ocr_key: default_ocr_key(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("quickclaims")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("quickclaims")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "unreadable settings, using defaults"
            );
            Settings::default()
        })
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ClaimsError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn ledgers_dir(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("ledgers")
}

pub fn exports_dir(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("exports")
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            data_dir: "/tmp/test".to_string(),
            active_month: Some("2024-07".to_string()),
            ocr_key: "k".to_string(),
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.data_dir, "/tmp/test");
        assert_eq!(loaded.active_month.as_deref(), Some("2024-07"));
        assert_eq!(loaded.ocr_key, "k");
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.active_month.is_none());
        assert_eq!(s.ocr_key, "helloworld");
        assert!(s.data_dir.ends_with("quickclaims"));
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"data_dir": "/tmp/test"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.ocr_key, "helloworld");
        assert!(s.active_month.is_none());
    }

    #[test]
    fn test_subdirectories() {
        let base = PathBuf::from("/data");
        assert_eq!(ledgers_dir(&base), PathBuf::from("/data/ledgers"));
        assert_eq!(exports_dir(&base), PathBuf::from("/data/exports"));
    }
}
