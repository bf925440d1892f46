use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Application settings, optionally loaded from a JSON file. Every field
/// has a default so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    /// Grid size override; each demo keeps its own default when unset.
    pub rows: Option<u32>,
    /// Model spin rate in degrees per second.
    pub spin_rate: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            rows: None,
            spin_rate: 60.0,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Settings> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing settings {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.width, 800);
        assert_eq!(settings.height, 600);
        assert_eq!(settings.rows, None);
        assert_eq!(settings.spin_rate, 60.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "rows": 5 }"#).unwrap();
        assert_eq!(settings.rows, Some(5));
        assert_eq!(settings.width, 800);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Settings::load(Path::new("no/such/settings.json")).is_err());
    }
}
