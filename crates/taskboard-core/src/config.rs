use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Lane ids in the left-to-right order the board renders them.
    #[serde(default)]
    pub lane_order: Option<Vec<String>>,

    /// Width assumed for pointer fallback when the caller supplies only an x coordinate.
    #[serde(default)]
    pub default_viewport_width: Option<f64>,
}

impl BoardConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the platform config location, falling back to defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path. Missing or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Could not read config {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Viewport width to use for pointer fallback, if any positive width is known.
    pub fn effective_viewport_width(&self, explicit: Option<f64>) -> Option<f64> {
        explicit
            .or(self.default_viewport_width)
            .filter(|w| w.is_finite() && *w > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempdir().unwrap();
        let config = BoardConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_load_lane_order_and_width() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "lane_order = [\"done\", \"todo\"]\ndefault_viewport_width = 1200.0\n",
        )
        .unwrap();

        let config = BoardConfig::load_from(&path);
        assert_eq!(
            config.lane_order,
            Some(vec!["done".to_string(), "todo".to_string()])
        );
        assert_eq!(config.default_viewport_width, Some(1200.0));
    }

    #[test]
    fn test_malformed_file_yields_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "lane_order = 42").unwrap();

        assert_eq!(BoardConfig::load_from(&path), BoardConfig::default());
    }

    #[test]
    fn test_effective_viewport_width() {
        let config = BoardConfig {
            lane_order: None,
            default_viewport_width: Some(800.0),
        };
        assert_eq!(config.effective_viewport_width(Some(1000.0)), Some(1000.0));
        assert_eq!(config.effective_viewport_width(None), Some(800.0));
        assert_eq!(config.effective_viewport_width(Some(0.0)), None);
        assert_eq!(BoardConfig::default().effective_viewport_width(None), None);
    }
}
