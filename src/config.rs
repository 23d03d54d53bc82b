//! Field configuration.
//!
//! Every tuned constant of the background lives in [`FieldConfig`]. The
//! defaults reproduce the stock look; a JSON file can override any subset
//! of fields, since each section falls back to its own defaults.
//!
//! ```json
//! {
//!   "max_particles": 40,
//!   "connections": { "radius": 120.0 },
//!   "seed": 7
//! }
//! ```

use crate::connections::ConnectionStyle;
use crate::error::FieldError;
use crate::rules::Rule;
use crate::spawn::SpawnConfig;
use crate::visuals::{Palette, Theme, VisualConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_max_particles() -> usize {
    65
}

fn default_area_per_particle() -> f32 {
    15000.0
}

fn default_light() -> Palette {
    Palette::light()
}

fn default_dark() -> Palette {
    Palette::dark()
}

/// Complete simulator configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    /// Hard cap on the particle count.
    #[serde(default = "default_max_particles")]
    pub max_particles: usize,
    /// Surface area (square pixels) per particle before the cap applies.
    #[serde(default = "default_area_per_particle")]
    pub area_per_particle: f32,
    #[serde(default)]
    pub spawn: SpawnConfig,
    /// Physics rules, applied in order every step.
    #[serde(default = "Rule::standard")]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub connections: ConnectionStyle,
    #[serde(default)]
    pub visuals: VisualConfig,
    /// Palette for the light theme.
    #[serde(default = "default_light")]
    pub light: Palette,
    /// Palette for the dark theme.
    #[serde(default = "default_dark")]
    pub dark: Palette,
    /// Fixed RNG seed. `None` seeds from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: default_max_particles(),
            area_per_particle: default_area_per_particle(),
            spawn: SpawnConfig::default(),
            rules: Rule::standard(),
            connections: ConnectionStyle::default(),
            visuals: VisualConfig::default(),
            light: Palette::light(),
            dark: Palette::dark(),
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Palette for `theme`.
    pub fn palette(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }

    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, FieldError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FieldError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Save this config as a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FieldError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
