//! Top-level configuration.
//!
//! One JSON document with a section per component. Every field has a
//! default, so an empty object `{}` is a valid config and a partial file
//! only overrides what it names.
//!
//! ```json
//! {
//!   "window": { "title": "folio", "width": 1440, "height": 900 },
//!   "field": { "count": 80, "enabled": true },
//!   "springs": { "tilt": { "stiffness": 300, "damping": 30 } },
//!   "contact": { "endpoint": "https://api.web3forms.com/submit" },
//!   "assets": { "root": "public" },
//!   "content": "content/portfolio.json"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::AssetsConfig;
use crate::contact::ContactConfig;
use crate::error::ConfigError;
use crate::field::FieldConfig;
use crate::signals::SpringConfig;
use crate::typing::TypingConfig;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Aman Kumar — Portfolio".into(),
            width: 1280,
            height: 800,
        }
    }
}

/// Spring constants for the smoothed bindings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringsConfig {
    pub tilt: SpringConfig,
    pub progress: SpringConfig,
}

impl Default for SpringsConfig {
    fn default() -> Self {
        Self {
            tilt: SpringConfig::TILT,
            progress: SpringConfig::PROGRESS,
        }
    }
}

/// Everything the binary can be configured with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub window: WindowConfig,
    pub field: FieldConfig,
    pub springs: SpringsConfig,
    pub typing: TypingConfig,
    pub contact: ContactConfig,
    pub assets: AssetsConfig,
    /// Content document; the embedded one when unset.
    pub content: Option<PathBuf>,
}

impl FolioConfig {
    /// Parse and range-check a config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "config".into(),
            source,
        })?;
        config.field.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from an explicit path, else from `$FOLIO_CONFIG`, else defaults.
    pub fn discover(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::info!("no config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            what: "config".into(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_window(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    pub fn with_springs(mut self, springs: SpringsConfig) -> Self {
        self.springs = springs;
        self
    }

    pub fn with_typing(mut self, typing: TypingConfig) -> Self {
        self.typing = typing;
        self
    }

    pub fn with_contact(mut self, contact: ContactConfig) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_assets(mut self, assets: AssetsConfig) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_content(mut self, path: impl Into<PathBuf>) -> Self {
        self.content = Some(path.into());
        self
    }
}
