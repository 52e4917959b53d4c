//! editor configuration: grid, hit-test tolerances, zoom limits and net naming

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// how nets are named when resolving the schematic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// reserved label of every net touching a ground component
    pub ground_label: String,
    /// catalog id of the ground component. components flagged `"ground": true` also count
    pub ground_component: String,
    /// prefix of generated net labels
    pub label_prefix: String,
    /// first generated label number
    pub label_seed: usize,
}

impl Default for NetConfig {
    fn default() -> Self {
        NetConfig {
            ground_label: String::from("0"),
            ground_component: String::from("ground"),
            label_prefix: String::from("n"),
            label_seed: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// grid unit in schematic space. placement, dragging and wire previews snap to multiples of it
    pub grid: u32,
    /// radius around a pin within which the cursor is considered over the pin, in schematic units
    pub pin_radius: f32,
    /// padding added around the pins of a component to form its clickable body
    pub body_padding: i32,
    /// distance from a wire within which the cursor is considered over the wire
    pub wire_tolerance: f32,
    /// zoom out limit
    pub min_zoom: f32,
    /// zoom in limit
    pub max_zoom: f32,
    pub nets: NetConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            grid: 10,
            pin_radius: 6.0,
            body_padding: 10,
            wire_tolerance: 3.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            nets: NetConfig::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: EditorConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid == 0 {
            return Err(ConfigError::Invalid(String::from("grid must be positive")));
        }
        if i32::try_from(self.grid).is_err() {
            return Err(ConfigError::Invalid(format!(
                "grid {} does not fit schematic coordinates",
                self.grid
            )));
        }
        if !(self.pin_radius > 0.0) {
            return Err(ConfigError::Invalid(String::from(
                "pin_radius must be positive",
            )));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom limits out of order: min {} max {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.nets.ground_label.is_empty() {
            return Err(ConfigError::Invalid(String::from(
                "ground_label must not be empty",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = EditorConfig::from_json(r#"{"grid": 5, "nets": {"label_prefix": "net_"}}"#).unwrap();
        assert_eq!(cfg.grid, 5);
        assert_eq!(cfg.pin_radius, 6.0);
        assert_eq!(cfg.nets.label_prefix, "net_");
        assert_eq!(cfg.nets.ground_label, "0");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"grid": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"min_zoom": 4.0, "max_zoom": 2.0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"grid": 4294967295}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(EditorConfig::from_json(r#"{"grid": 2147483647}"#).is_ok());
        assert!(matches!(
            EditorConfig::from_json("{grid"),
            Err(ConfigError::Parse(_))
        ));
    }
}
