//! TOML-based engine configuration.
//!
//! Stores:
//! - Classification thresholds and the policy used for the matrix view
//! - Canvas dimensions
//! - The importance scale incoming task records use
//!
//! Configuration is stored at `~/.config/eisenmatrix/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classifier::{
    ClassificationPolicy, PolicyKind, ANALYTICS_IMPORTANCE_THRESHOLD,
    DEFAULT_URGENT_THRESHOLD_HOURS, LIVE_IMPORTANCE_THRESHOLD,
};
use crate::error::{ConfigError, FrameError};
use crate::frame::{CanvasFrame, DEFAULT_MARGIN};
use crate::task::ImportanceScaleKind;

/// Classification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Policy used when none is requested explicitly
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default = "default_urgent_threshold_hours")]
    pub urgent_threshold_hours: f64,
    #[serde(default = "default_live_threshold")]
    pub live_importance_threshold: f64,
    #[serde(default = "default_analytics_threshold")]
    pub analytics_importance_threshold: f64,
}

/// Canvas configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_margin")]
    pub margin: f64,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Scale of importance values in incoming task records
    #[serde(default)]
    pub importance_scale: ImportanceScaleKind,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

fn default_urgent_threshold_hours() -> f64 {
    DEFAULT_URGENT_THRESHOLD_HOURS
}
fn default_live_threshold() -> f64 {
    LIVE_IMPORTANCE_THRESHOLD
}
fn default_analytics_threshold() -> f64 {
    ANALYTICS_IMPORTANCE_THRESHOLD
}
fn default_width() -> f64 {
    480.0
}
fn default_height() -> f64 {
    450.0
}
fn default_margin() -> f64 {
    DEFAULT_MARGIN
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            urgent_threshold_hours: default_urgent_threshold_hours(),
            live_importance_threshold: default_live_threshold(),
            analytics_importance_threshold: default_analytics_threshold(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
        }
    }
}

/// Returns `~/.config/eisenmatrix[-dev]/` based on EISENMATRIX_ENV.
///
/// Set EISENMATRIX_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("EISENMATRIX_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("eisenmatrix-dev")
    } else {
        base_dir.join("eisenmatrix")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl Config {
    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Validated canvas frame.
    pub fn frame(&self) -> Result<CanvasFrame, FrameError> {
        CanvasFrame::new(self.canvas.width, self.canvas.height, self.canvas.margin)
    }

    /// The configured default policy.
    pub fn policy(&self) -> ClassificationPolicy {
        self.policy_for(self.classification.policy)
    }

    /// A named policy with the configured thresholds applied.
    pub fn policy_for(&self, kind: PolicyKind) -> ClassificationPolicy {
        let threshold = match kind {
            PolicyKind::Live => self.classification.live_importance_threshold,
            PolicyKind::Analytics => self.classification.analytics_importance_threshold,
        };
        ClassificationPolicy::for_kind(kind)
            .with_importance_threshold(threshold)
            .with_urgent_threshold_hours(self.classification.urgent_threshold_hours)
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        key.split('.').try_fold(root, |current, part| current.get(part))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// The value is parsed according to the type of the current value. The
    /// resulting config must still describe a valid canvas frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        let (parent_key, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };

        let parent = match parent_key {
            Some(p) => p
                .split('.')
                .try_fold(&mut json, |current, part| current.get_mut(part)),
            None => Some(&mut json),
        }
        .and_then(|v| v.as_object_mut())
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let existing = parent
            .get(leaf)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => value
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
            _ => serde_json::Value::String(value.to_string()),
        };
        parent.insert(leaf.to_string(), new_value);

        let updated: Config =
            serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.frame().map_err(|e| invalid(e.to_string()))?;
        *self = updated;
        Ok(())
    }
}
