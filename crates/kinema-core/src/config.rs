use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{KinemaError, KinemaResult, Quality};

/// Project configuration loaded from `kinema.toml`.
///
/// Every field has a default so a missing config file is never an error;
/// command-line flags override whatever the file provides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KinemaConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub fonts: FontConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory video files are written to.
    pub dir: String,
    /// Default quality tier when --quality is not given.
    pub quality: Quality,
    /// Default output format: "mp4", "gif", or "png".
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
            quality: Quality::Medium,
            format: "mp4".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FontConfig {
    /// Explicit path to a TTF/OTF file used for text rendering. When unset,
    /// the renderer scans the standard system font directories.
    pub path: Option<String>,
}

impl KinemaConfig {
    /// Load the config from a TOML file.
    pub fn load_from_file(path: &Path) -> KinemaResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| KinemaError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load `kinema.toml` from the current directory if present, otherwise
    /// fall back to defaults.
    pub fn load_or_default() -> KinemaResult<Self> {
        let path = Path::new("kinema.toml");
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the config to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> KinemaResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| KinemaError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
