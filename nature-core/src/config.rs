//! Scene configuration, loadable from TOML.

use crate::error::{NatureError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry and population limits of a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: f32,
    pub height: f32,
    /// Maximum population kept at the start of each frame; `None` is unbounded
    pub entity_cap: Option<usize>,
    /// Clear the surface before each step pass
    pub clear_each_frame: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            entity_cap: None,
            clear_each_frame: true,
        }
    }
}

impl SceneConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_entity_cap(mut self, cap: usize) -> Self {
        self.entity_cap = Some(cap);
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(NatureError::configuration(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SceneConfig =
            toml::from_str(source).map_err(|e| NatureError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            NatureError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }
}
